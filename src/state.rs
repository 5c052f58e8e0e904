use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::models::{ExpenseDetails, IncomeDetails};
use crate::services::Registry;

/// Application state shared across handlers. The shutdown token is the root
/// of every per-request cancellation token.
#[derive(Clone)]
pub struct AppState {
    pub expenses: Arc<Registry<ExpenseDetails>>,
    pub incomes: Arc<Registry<IncomeDetails>>,
    pub shutdown: CancellationToken,
}
