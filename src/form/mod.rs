pub mod autocomplete;
pub mod signals;
pub mod task_form;

pub use autocomplete::{AutocompleteState, Key, Navigation};
pub use signals::{EditorRequest, FormCommand, HostSignal};
pub use task_form::{Commit, FormError, KeyOutcome, Submission, TaskForm};
