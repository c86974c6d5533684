//! Screen-to-screen menu hand-off: visits, confirmation gates, and the navigation channel.

pub mod confirmation;
pub mod navigator;
pub mod notice;
pub mod visit;

pub use confirmation::{gated, Confirmation};
pub use navigator::{NavigationError, Navigator};
pub use notice::{NoticeContext, NoticeSeverity, UserNotice};
pub use visit::{sign_in, ExitAction, ScreenVisit};
