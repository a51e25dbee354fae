//! Quote service module
//!
//! Fetches recent price history, estimates volatility and prices the terms.
//! Pricing is separate from execution: nothing here submits transactions.

mod service;
mod view;

pub use service::QuoteService;
pub use view::QuoteView;

use crate::feed::FetchError;
use crate::model::ModelError;
use crate::money::MoneyError;
use thiserror::Error;

/// Quote request errors
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Zero amount or zero duration
    #[error("Invalid option terms: {0}")]
    InvalidTerms(&'static str),
    /// Model parameters out of range
    #[error("Invalid model parameters: {0}")]
    InvalidParams(String),
    /// Fixed-point arithmetic failure
    #[error(transparent)]
    Math(#[from] MoneyError),
    /// Price history fetch was cancelled
    #[error("Quote cancelled")]
    Cancelled,
    /// Price source failure, passed through unchanged
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl From<ModelError> for QuoteError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidTerms(reason) => QuoteError::InvalidTerms(reason),
            ModelError::InvalidParams(reason) => QuoteError::InvalidParams(reason),
            ModelError::Math(e) => QuoteError::Math(e),
        }
    }
}

impl From<FetchError> for QuoteError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Cancelled => QuoteError::Cancelled,
            FetchError::Transport(e) => QuoteError::Transport(e),
        }
    }
}
