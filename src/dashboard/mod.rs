//! Interactive dashboard - input form, prediction results and history
//! analytics, rendered on the server

pub mod analytics;
pub mod chart;
pub mod cookie;
pub mod form;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
pub mod view;

pub use router::create_dashboard_router;
pub use session::{ClientSession, Notice, NoticeLevel, Page, SessionEvent, SessionStore};
pub use state::DashboardState;
