use std::sync::Arc;

use crate::modules::payment::application::ports::incoming::use_cases::{
    ConfirmPaymentUseCase, InitiatePaymentUseCase,
};

#[derive(Clone)]
pub struct PaymentUseCases {
    pub initiate: Arc<dyn InitiatePaymentUseCase + Send + Sync>,
    pub confirm: Arc<dyn ConfirmPaymentUseCase + Send + Sync>,
}
