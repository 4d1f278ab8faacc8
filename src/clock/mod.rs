//! Clock dials, hands and the two leader-style countdown overlays.

pub mod face;
pub mod film;
pub mod hands;
pub mod ring;

pub use face::{ClockFace, clock_face, countdown_clock_face, dial_background, dial_foreground};
pub use film::{film_background, film_circles, film_counter, old_film_frame, old_film_swipe};
pub use hands::{hand_angle_deg, second_hand};
pub use ring::{RingStyle, RingTime, format_clock, ring_countdown};
