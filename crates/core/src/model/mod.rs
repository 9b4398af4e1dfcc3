mod category;
mod ids;
mod question;
mod scenario;

pub use category::{ParseCategoryError, ScenarioCategory};
pub use ids::ScenarioId;
pub use question::{AnswerOption, QuestionTemplate, Verdict};
pub use scenario::{Scenario, ScenarioDraft, ScenarioStore};
