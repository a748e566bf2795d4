pub mod confirm_payment_service;
pub mod initiate_payment_service;

pub use confirm_payment_service::ConfirmPaymentService;
pub use initiate_payment_service::InitiatePaymentService;
