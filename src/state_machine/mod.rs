mod backoff;
mod events;
mod notify;
mod options;
mod session;
mod state;
mod status;

pub use backoff::{BackoffPolicy, BackoffStrategy};
pub use events::{NoEvents, PollEvent, PollEvents, TracingEvents};
pub use notify::{AsyncStatusObserver, ChangeNotifier, Observer, StatusChange, StatusObserver};
pub use options::{PollOptions, ValidatedOptions};
pub use session::PollSession;
pub use state::{State, Transition};
pub use status::JobStatus;
