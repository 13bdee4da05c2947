pub mod correlation;

pub use correlation::{propagate_correlation_id, CorrelationId, CORRELATION_ID_HEADER};
