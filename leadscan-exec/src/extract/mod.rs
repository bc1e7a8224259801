// Tier 1: Page-level extraction
//
// Independent modules over one page's text:
// - candidates: name-shaped spans (recall)
// - validator: lexicon/context scoring (precision)
// - window: bounded windows around positions
// - contact_tokens: emails, phones, profile URLs
// - attributor: token → person linking
// - title: title phrase and seniority tier
// - page: runs the above and builds per-person claims

pub mod attributor;
pub mod candidates;
pub mod contact_tokens;
pub mod page;
pub mod title;
pub mod validator;
pub mod window;

pub use attributor::ContactAttributor;
pub use candidates::CandidateGenerator;
pub use contact_tokens::ContactTokenScanner;
pub use page::{PageExtraction, PageExtractor, PageText};
pub use title::TitleClassifier;
pub use validator::{NameValidator, ScoringRule, RULESET_VERSION};
pub use window::{build_window, window_around_span};
