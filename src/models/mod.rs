pub mod user;
pub mod movie;
pub mod hall;
pub mod seat;
pub mod showtime;
pub mod booking;

pub use user::{Role, User};
pub use movie::{AddMovieRequest, Movie};
pub use hall::{AddHallRequest, Hall};
pub use seat::Seat;
pub use showtime::{AddShowtimeRequest, Showtime};
pub use booking::{BookSeatRequest, Booking, BookingOverride};
