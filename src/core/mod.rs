pub mod clock;
pub mod generation;
pub mod generator;
pub mod state;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generation::{GenerationCompleted, GenerationRequest, GenerationService, RequestId};
pub use generator::{BlueprintGenerator, TemplateGenerator};
pub use state::{BlueprintView, Effect, Event, Notice, Rejection, ViewMode};
pub use validation::{validate, ValidationErrors};
