pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use cm_core::repositories::{OtpRepository, UserRepository};
use cm_core::services::{MailerTrait, OtpService};

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<O, U, M>
where
    O: OtpRepository,
    U: UserRepository,
    M: MailerTrait,
{
    pub otp_service: Arc<OtpService<O, U, M>>,
    /// Whether internal error details are included in responses
    pub expose_error_details: bool,
}
