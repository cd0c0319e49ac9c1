use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_client::{
    config::{Config, LogFormat},
    models::{Booking, BookingOverride, Hall, Movie, Role, Seat, Showtime, User},
    routing::{guard, navigation, Guard, Route},
    screens::Outcome,
    validation::{HallForm, LoginForm, MovieForm, RegisterForm, ShowtimeForm},
    AppState,
};

#[derive(Parser)]
#[command(name = "cinema", version, about = "Cinema booking client")]
struct Cli {
    /// Base URL of the booking API (overrides CINEMA_API_BASE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Path to a cinema.toml settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the session
    Login { email: String, password: String },
    /// Create a new account
    Register {
        name: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current user and the navigation menu
    Whoami,
    /// Check where a client path leads for the current session
    Open { path: String },
    #[command(subcommand)]
    Movies(MovieCommand),
    #[command(subcommand)]
    Halls(HallCommand),
    #[command(subcommand)]
    Showtimes(ShowtimeCommand),
    /// Show the seat map of a showtime
    Seats { showtime_id: i64 },
    /// Book a seat for a showtime
    Book {
        showtime_id: i64,
        #[arg(long)]
        seat: Option<String>,
        #[arg(long)]
        price: f64,
    },
    #[command(subcommand)]
    Bookings(BookingCommand),
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand)]
enum MovieCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show { id: i64 },
    Add {
        title: String,
        genre: String,
        duration: i32,
        release_date: String,
    },
    /// Edit a movie; omitted fields keep their current values
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long)]
        release_date: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum HallCommand {
    List,
    Seats { hall_id: i64 },
    Add { name: String, total_seats: i32 },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        total_seats: Option<i32>,
    },
    Delete { id: i64 },
    /// Mark a seat as available or taken
    SetSeat {
        seat_id: i64,
        #[arg(action = clap::ArgAction::Set)]
        available: bool,
    },
}

#[derive(Subcommand)]
enum ShowtimeCommand {
    List {
        #[arg(long)]
        movie: Option<i64>,
    },
    /// Movies and halls to pick from when scheduling
    Options,
    Add {
        start_time: String,
        movie_id: i64,
        hall_id: i64,
    },
    Edit {
        id: i64,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        movie_id: Option<i64>,
        #[arg(long)]
        hall_id: Option<i64>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum BookingCommand {
    /// Own bookings (all bookings for an admin)
    List,
    Update {
        id: i64,
        #[arg(long)]
        seat: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum UserCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Role { user_id: i64, role: Role },
    Delete { user_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;
    if let Some(url) = cli.url.clone() {
        config = config.with_base_url(url)?;
    }

    let json_logs = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.rust_log)),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let state = AppState::new(config).context("Failed to start the client")?;
    info!("Session file: {}", state.config.session_file.display());

    let ok = run(&state, cli.command).await;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: &AppState, command: Command) -> bool {
    let screens = &state.screens;

    match command {
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            render(screens.login(&form).await, |u| println!("{}", user_line(u)))
        }
        Command::Register { name, email, password, confirm_password } => {
            let form = RegisterForm { name, email, password, confirm_password };
            render(screens.register(&form).await, |u| println!("{}", user_line(u)))
        }
        Command::Logout => render(screens.logout(), |_| {}),
        Command::Whoami => {
            match state.auth().user() {
                Some(user) => println!("{}", user_line(&user)),
                None => println!("Not logged in"),
            }
            for item in navigation(state.auth()) {
                match item.route {
                    Some(route) => println!("  {:<14} {}", item.label, route),
                    None => println!("  {}", item.label),
                }
            }
            true
        }
        Command::Open { path } => match Route::parse(&path) {
            Some(route) => {
                match guard(route, state.auth()) {
                    Guard::Allow => println!("{} is open", route),
                    Guard::Redirect(to) => println!("{} redirects to {}", route, to),
                }
                true
            }
            None => {
                eprintln!("Unknown path {}", path);
                false
            }
        },
        Command::Movies(cmd) => run_movies(state, cmd).await,
        Command::Halls(cmd) => run_halls(state, cmd).await,
        Command::Showtimes(cmd) => run_showtimes(state, cmd).await,
        Command::Seats { showtime_id } => {
            render(screens.open_booking(showtime_id).await, |map| {
                println!("{}", showtime_line(&map.showtime));
                print_seats(&map.seats);
            })
        }
        Command::Book { showtime_id, seat, price } => {
            render(screens.book(showtime_id, seat.as_deref(), price).await, |b| {
                println!("{}", booking_line(b))
            })
        }
        Command::Bookings(cmd) => run_bookings(state, cmd).await,
        Command::Users(cmd) => run_users(state, cmd).await,
    }
}

async fn run_movies(state: &AppState, cmd: MovieCommand) -> bool {
    let screens = &state.screens;

    match cmd {
        MovieCommand::List { search } => {
            let outcome = match search {
                Some(term) => screens.search_movies(&term).await,
                None => screens.list_movies().await,
            };
            render(outcome, |movies| print_rows(movies, movie_line))
        }
        MovieCommand::Show { id } => render(screens.load_movie(id).await, |m| {
            println!("{}", movie_line(m));
            for showtime in m.showtimes.iter().flatten() {
                println!("  {}", showtime_line(showtime));
            }
        }),
        MovieCommand::Add { title, genre, duration, release_date } => {
            let form = MovieForm { title, genre, duration_minutes: duration, release_date };
            render(screens.add_movie(&form).await, |m| println!("{}", movie_line(m)))
        }
        MovieCommand::Edit { id, title, genre, duration, release_date } => {
            let current = screens.load_movie(id).await;
            let Some(movie) = &current.data else {
                return render(current, |_| {});
            };

            let mut form = MovieForm::from(movie);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(genre) = genre {
                form.genre = genre;
            }
            if let Some(duration) = duration {
                form.duration_minutes = duration;
            }
            if let Some(release_date) = release_date {
                form.release_date = release_date;
            }
            render(screens.edit_movie(id, &form).await, |m| println!("{}", movie_line(m)))
        }
        MovieCommand::Delete { id } => render(screens.delete_movie(id).await, print_text),
    }
}

async fn run_halls(state: &AppState, cmd: HallCommand) -> bool {
    let screens = &state.screens;

    match cmd {
        HallCommand::List => {
            render(screens.list_halls().await, |halls| print_rows(halls, hall_line))
        }
        HallCommand::Seats { hall_id } => render(screens.hall_seats(hall_id).await, |seats| {
            print_seats(seats)
        }),
        HallCommand::Add { name, total_seats } => {
            let form = HallForm { name, total_seats };
            render(screens.add_hall(&form).await, |h| println!("{}", hall_line(h)))
        }
        HallCommand::Edit { id, name, total_seats } => {
            let current = screens.load_hall(id).await;
            let Some(hall) = &current.data else {
                return render(current, |_| {});
            };

            let mut form = HallForm::from(hall);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(total_seats) = total_seats {
                form.total_seats = total_seats;
            }
            render(screens.edit_hall(id, &form).await, |h| println!("{}", hall_line(h)))
        }
        HallCommand::Delete { id } => render(screens.delete_hall(id).await, print_text),
        HallCommand::SetSeat { seat_id, available } => {
            render(screens.set_seat_availability(seat_id, available).await, |s| {
                print_seats(std::slice::from_ref(s))
            })
        }
    }
}

async fn run_showtimes(state: &AppState, cmd: ShowtimeCommand) -> bool {
    let screens = &state.screens;

    match cmd {
        ShowtimeCommand::List { movie } => {
            let outcome = match movie {
                Some(movie_id) => screens.showtimes_by_movie(movie_id).await,
                None => screens.list_showtimes().await,
            };
            render(outcome, |showtimes| print_rows(showtimes, showtime_line))
        }
        ShowtimeCommand::Options => render(screens.showtime_options().await, |options| {
            println!("Movies:");
            print_rows(&options.movies, movie_line);
            println!("Halls:");
            print_rows(&options.halls, hall_line);
        }),
        ShowtimeCommand::Add { start_time, movie_id, hall_id } => {
            let form = ShowtimeForm { start_time, movie_id, hall_id };
            render(screens.add_showtime(&form).await, |s| println!("{}", showtime_line(s)))
        }
        ShowtimeCommand::Edit { id, start_time, movie_id, hall_id } => {
            let current = screens.load_showtime(id).await;
            let Some(showtime) = &current.data else {
                return render(current, |_| {});
            };

            let mut form = ShowtimeForm::from(showtime);
            if let Some(start_time) = start_time {
                form.start_time = start_time;
            }
            if let Some(movie_id) = movie_id {
                form.movie_id = movie_id;
            }
            if let Some(hall_id) = hall_id {
                form.hall_id = hall_id;
            }
            render(screens.edit_showtime(id, &form).await, |s| println!("{}", showtime_line(s)))
        }
        ShowtimeCommand::Delete { id } => render(screens.delete_showtime(id).await, print_text),
    }
}

async fn run_bookings(state: &AppState, cmd: BookingCommand) -> bool {
    let screens = &state.screens;

    match cmd {
        BookingCommand::List => {
            render(screens.my_bookings().await, |bookings| print_rows(bookings, booking_line))
        }
        BookingCommand::Update { id, seat, price } => {
            let changes = BookingOverride { seat_number: seat, price };
            render(screens.override_booking(id, &changes).await, |b| {
                println!("{}", booking_line(b))
            })
        }
        BookingCommand::Delete { id } => render(screens.cancel_booking(id).await, print_text),
    }
}

async fn run_users(state: &AppState, cmd: UserCommand) -> bool {
    let screens = &state.screens;

    match cmd {
        UserCommand::List { search } => {
            render(screens.list_users(&search).await, |users| print_rows(users, user_line))
        }
        UserCommand::Role { user_id, role } => {
            render(screens.change_role(user_id, role).await, |u| println!("{}", user_line(u)))
        }
        UserCommand::Delete { user_id } => render(screens.delete_user(user_id).await, print_text),
    }
}

/// Печатает данные, баннер и переход. `false` - действие не удалось.
fn render<T>(outcome: Outcome<T>, show: impl FnOnce(&T)) -> bool {
    if let Some(data) = &outcome.data {
        show(data);
    }
    if let Some(banner) = &outcome.banner {
        if banner.is_error() {
            eprintln!("{}", banner);
        } else {
            println!("{}", banner);
        }
    }
    if let Some(route) = outcome.redirect {
        debug!("Redirect to {}", route);
        println!("-> {}", route);
    }
    outcome.is_success()
}

fn print_rows<T>(rows: &[T], line: impl Fn(&T) -> String) {
    for row in rows {
        println!("{}", line(row));
    }
}

fn print_text(text: &String) {
    if !text.trim().is_empty() {
        println!("{}", text.trim());
    }
}

fn print_seats(seats: &[Seat]) {
    for seat in seats {
        let state = if seat.available { "free" } else { "taken" };
        println!("{:>6} {:<6} {}", id_or_dash(seat.id), seat.seat_number, state);
    }
}

fn id_or_dash(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn movie_line(movie: &Movie) -> String {
    format!(
        "{:>6} {} ({}, {} min, {})",
        id_or_dash(movie.id),
        movie.title,
        movie.genre.as_deref().unwrap_or("-"),
        movie.duration_minutes,
        or_dash(movie.release_date),
    )
}

fn hall_line(hall: &Hall) -> String {
    format!("{:>6} {} ({} seats)", id_or_dash(hall.id), hall.name, hall.total_seats)
}

fn showtime_line(showtime: &Showtime) -> String {
    format!(
        "{:>6} {} {} in {}",
        id_or_dash(showtime.id),
        showtime.start_time.format("%Y-%m-%d %H:%M"),
        showtime.movie_title(),
        showtime.hall.as_ref().map(|h| h.name.as_str()).unwrap_or("-"),
    )
}

fn booking_line(booking: &Booking) -> String {
    format!(
        "{:>6} seat {} for {} at {:.2} by {}",
        id_or_dash(booking.id),
        booking.seat_number,
        booking.showtime.as_ref().map(|s| s.movie_title()).unwrap_or("-"),
        booking.price,
        booking.user.as_ref().map(|u| u.email.as_str()).unwrap_or("-"),
    )
}

fn user_line(user: &User) -> String {
    format!(
        "{:>6} {} <{}> {}",
        id_or_dash(user.id),
        user.name,
        user.email,
        or_dash(user.role),
    )
}
