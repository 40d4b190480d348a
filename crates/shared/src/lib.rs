//! Flow description model, navigation actions and error taxonomy shared by the
//! tour engine and its hosts.

pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{Flow, HookName, Media, MediaKind, Slide, SlideStyle};
pub use error::{ErrorKind, TourError};
pub use protocol::{Key, TourAction};
