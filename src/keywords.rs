/// Builds the keyword list from the persona role and the task description.
///
/// Tokens are split on whitespace and kept verbatim: no lowercasing, no
/// deduplication. Case is folded later, at scoring time.
pub fn extract_keywords(role: &str, task: &str) -> Vec<String> {
    format!("{} {}", role, task)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_and_task_tokens_in_order() {
        assert_eq!(
            extract_keywords("Analyst", "find risks"),
            vec!["Analyst", "find", "risks"]
        );
    }

    #[test]
    fn test_duplicates_and_case_are_kept() {
        assert_eq!(
            extract_keywords("Travel Planner", "Plan a trip  for\tfriends, plan"),
            vec!["Travel", "Planner", "Plan", "a", "trip", "for", "friends,", "plan"]
        );
    }

    #[test]
    fn test_empty_inputs_yield_no_keywords() {
        assert!(extract_keywords("", "").is_empty());
        assert_eq!(extract_keywords("", "budget"), vec!["budget"]);
    }
}
