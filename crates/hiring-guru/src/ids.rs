use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Platform user identifier.
    UserId
);
entity_id!(
    /// Predefined or custom assessment template identifier.
    AssessmentId
);
entity_id!(
    /// Round template identifier inside an assessment.
    RoundTemplateId
);
entity_id!(
    /// Hiring process identifier.
    ProcessId
);
entity_id!(
    /// Concrete round identifier inside a hiring process.
    RoundId
);
entity_id!(QuestionId);
entity_id!(ResponseId);
entity_id!(SubmissionId);
entity_id!(AnalysisId);
