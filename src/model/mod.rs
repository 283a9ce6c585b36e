//! Data model for resume parsing.
//!
//! Fragments come in from the page renderer, are cleaned into spans,
//! grouped into lines and sections, and end up as a [`ResumeRecord`].
//! Every value here is created per parse and dropped afterwards.

mod line;
mod record;
mod section;
mod span;

pub use line::{average_char_width, typical_line_gap, Line, LineStatistics};
pub use record::{EntryAttributes, RecordValue, ResumeRecord};
pub use section::{Section, SectionEntry, SectionType, Subsection, PROFILE_SECTION};
pub use span::{is_bold_font, RawFragment, TextSpan};
