pub mod confirm_payment;
pub mod initiate_payment;

pub use confirm_payment::{ConfirmPaymentError, ConfirmPaymentOutcome, ConfirmPaymentUseCase};
pub use initiate_payment::{InitiatePaymentError, InitiatePaymentOutput, InitiatePaymentUseCase};
