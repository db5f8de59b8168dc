// CSS Extractor Media Queries - Collect @media conditions and their nested selectors

use super::types::{AtRule, CssRule, MediaQuery, Stylesheet};

pub(super) struct MediaExtractor;

impl MediaExtractor {
    /// Every top-level `@media` rule, in document order
    pub(super) fn extract_media_queries(stylesheet: &Stylesheet) -> Vec<MediaQuery> {
        stylesheet
            .at_rules()
            .filter(|rule| rule.name == "media")
            .map(Self::extract_media_query)
            .collect()
    }

    /// Only rules directly inside the block are listed; deeper nesting is ignored
    pub(super) fn extract_media_query(rule: &AtRule) -> MediaQuery {
        let rule_selectors = rule
            .block
            .iter()
            .flat_map(|block| block.rules.iter())
            .filter_map(CssRule::as_qualified)
            .map(|nested| nested.prelude.clone())
            .collect();

        MediaQuery {
            condition: rule.prelude.clone(),
            rule_selectors,
        }
    }
}
