pub mod file;
pub mod loaders;
pub mod question;
pub mod wire;

pub use file::{MediaType, SelectedFile};
pub use loaders::load_selected_file;
pub use question::{GenerationSettings, Question, QuestionType, Quiz};
