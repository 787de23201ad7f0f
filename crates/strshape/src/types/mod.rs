//! Core types for analyzed localization strings.

mod entry;
mod param;
mod plural_rule;
mod source_id;

pub use entry::ResolvedEntry;
pub use param::StringParam;
pub use plural_rule::{
    FORMAT_SPEC_TYPE_KEY, FORMAT_VALUE_TYPE_KEY, LOCALIZED_FORMAT_KEY, PLURAL_RULE_TYPE,
    PluralRuleEntry, PluralVariable,
};
pub use source_id::{LocaleId, SourceId};
