use crate::api::ApiResult;
use crate::command::Operation;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    /// A line confirmed with Enter; the input field is already cleared.
    Submit { line: String },
    /// A dispatch finished, in whatever order the backend answered.
    Settle { op: Operation, result: ApiResult },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
