pub mod quiz_flow;
pub mod session;
pub mod view;

pub use quiz_flow::QuizFlow;
pub use session::{AcceptedFile, GenerationTicket, Phase, QuizSession};
pub use view::{OptionView, QuestionView, ResultItemView, ResultsView, UploadView, View};
