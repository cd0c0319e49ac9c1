//! Сценарии экранов поверх mock-бэкенда: вход, бронирование, доступ администратора.

mod common;

use std::time::Duration;

use cinema_client::feedback::BannerKind;
use cinema_client::routing::Route;
use cinema_client::screens::{Screens, ALREADY_BUSY};
use cinema_client::validation::{LoginForm, RegisterForm};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, mint_token, screens_as, showtime_json};

#[tokio::test]
async fn login_screen_redirects_to_movies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(mint_token("bob@example.com", "USER", 9)),
        )
        .mount(&server)
        .await;

    let screens = Screens::new(client(&server));
    let form = LoginForm { email: "bob@example.com".into(), password: "secret1".into() };
    let outcome = screens.login(&form).await;

    assert_eq!(outcome.redirect, Some(Route::Movies));
    assert_eq!(outcome.banner.unwrap().message, "Login successful!");
    assert_eq!(outcome.data.unwrap().id, Some(9));
    assert!(!screens.is_busy());
}

#[tokio::test]
async fn wrong_password_keeps_user_on_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let screens = Screens::new(client(&server));
    let form = LoginForm { email: "bob@example.com".into(), password: "nope".into() };
    let outcome = screens.login(&form).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.redirect, None);
    assert_eq!(
        outcome.banner.unwrap().message,
        "Invalid email or password. Please check your credentials."
    );
    assert!(!screens.auth().is_authenticated());
}

#[tokio::test]
async fn invalid_forms_never_reach_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let screens = Screens::new(client(&server));
    let outcome = screens.login(&LoginForm { email: "bob".into(), password: "x".into() }).await;
    assert_eq!(outcome.banner.unwrap().message, "Please enter a valid email address");

    let form = RegisterForm {
        name: "Bob".into(),
        email: "bob@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret2".into(),
    };
    let outcome = screens.register(&form).await;
    assert_eq!(outcome.banner.unwrap().message, "Passwords do not match");
}

#[tokio::test]
async fn anonymous_booking_redirects_to_login() {
    let server = MockServer::start().await;
    let screens = Screens::new(client(&server));

    let outcome = screens.open_booking(3).await;
    assert_eq!(outcome.redirect, Some(Route::Login));

    let outcome = screens.book(3, Some("A1"), 10.0).await;
    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn booking_flow_loads_seats_and_books() {
    let server = MockServer::start().await;
    mount_seat_map(&server).await;
    Mock::given(method("POST"))
        .and(path("/bookings/book"))
        .and(query_param("userId", "4"))
        .and(query_param("showtimeId", "3"))
        .and(query_param("seatNumber", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 50, "seatNumber": "A1", "price": 12.5, "showtime": showtime_json(3, 2)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let screens = screens_as(&server, "USER", 4);

    let map = screens.open_booking(3).await.data.unwrap();
    assert_eq!(map.seats.len(), 2);
    assert!(map.select("A2").is_err());
    let seat = map.select("A1").unwrap();

    let outcome = screens.book(3, Some(&seat.seat_number), 12.5).await;
    assert_eq!(outcome.redirect, Some(Route::MyBookings));
    assert_eq!(outcome.banner.unwrap().message, "Booking successful!");
    assert_eq!(outcome.data.unwrap().id, Some(50));
}

async fn mount_seat_map(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/showtimes/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(showtime_json(3, 2)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/halls/2/seats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "seatNumber": "A1", "available": true},
            {"id": 2, "seatNumber": "A2", "available": false}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn taken_or_unknown_seat_is_never_posted() {
    let server = MockServer::start().await;
    mount_seat_map(&server).await;
    Mock::given(method("POST"))
        .and(path("/bookings/book"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let screens = screens_as(&server, "USER", 4);

    let outcome = screens.book(3, Some("A2"), 5.0).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.redirect, None);
    let banner = outcome.banner.unwrap();
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(
        banner.message,
        "This seat has already been booked. Please select another seat."
    );

    let outcome = screens.book(3, Some("Z9"), 5.0).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.banner.unwrap().kind, BannerKind::Error);

    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 0);
}

#[tokio::test]
async fn taken_seat_reported_from_server_text() {
    let server = MockServer::start().await;
    mount_seat_map(&server).await;
    Mock::given(method("POST"))
        .and(path("/bookings/book"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Seat already booked!"})),
        )
        .mount(&server)
        .await;

    let screens = screens_as(&server, "USER", 4);
    let outcome = screens.book(3, Some("A1"), 10.0).await;

    let banner = outcome.banner.unwrap();
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(
        banner.message,
        "This seat has already been booked. Please select another seat."
    );
}

#[tokio::test]
async fn booking_without_seat_is_rejected_locally() {
    let server = MockServer::start().await;
    let screens = screens_as(&server, "USER", 4);

    let outcome = screens.book(3, Some("  "), 10.0).await;
    assert_eq!(outcome.banner.unwrap().message, "Please select a seat");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn my_bookings_depends_on_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/user/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "seatNumber": "A1", "price": 10.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "seatNumber": "A1", "price": 10.0},
            {"id": 2, "seatNumber": "B3", "price": 8.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let user = screens_as(&server, "USER", 4);
    assert_eq!(user.my_bookings().await.data.unwrap().len(), 1);

    let admin = screens_as(&server, "ADMIN", 1);
    assert_eq!(admin.my_bookings().await.data.unwrap().len(), 2);
}

#[tokio::test]
async fn user_management_is_admin_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "email": "ann@example.com", "name": "Ann", "role": "ADMIN"},
            {"id": 9, "email": "bob@example.com", "name": "Bob", "role": "USER"}
        ])))
        .mount(&server)
        .await;

    let user = screens_as(&server, "USER", 9);
    assert_eq!(user.list_users("").await.redirect, Some(Route::Movies));
    assert_eq!(user.delete_user(1).await.redirect, Some(Route::Movies));

    let admin = screens_as(&server, "ADMIN", 1);
    let found = admin.list_users("bob").await.data.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Bob");

    let outcome = admin.list_users("nobody").await;
    assert!(outcome.data.unwrap().is_empty());
    assert_eq!(outcome.banner.unwrap().message, "No users match your search");
}

#[tokio::test]
async fn forbidden_admin_form_names_the_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/halls/add"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access Denied"))
        .mount(&server)
        .await;

    let screens = screens_as(&server, "USER", 4);
    let form = cinema_client::validation::HallForm { name: "Red".into(), total_seats: 40 };
    let outcome = screens.add_hall(&form).await;

    assert_eq!(
        outcome.banner.unwrap().message,
        "You do not have permission to add halls. Admin access required."
    );
    // 403 сессию не завершает
    assert!(screens.auth().is_authenticated());
}

#[tokio::test]
async fn second_submit_is_refused_while_first_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/movies/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Movie deleted")
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let screens = screens_as(&server, "ADMIN", 1);
    let (first, second) = tokio::join!(screens.delete_movie(5), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        screens.delete_movie(5).await
    });

    assert_eq!(first.data.as_deref(), Some("Movie deleted"));
    assert_eq!(first.redirect, Some(Route::Movies));
    assert_eq!(second.banner.unwrap().message, ALREADY_BUSY);
    assert!(!screens.is_busy());
}
