/// Compute effective limit with precedence: local arg -> global flag -> configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// Keep at most `limit` rows.
pub fn apply_limit<T>(rows: &mut Vec<T>, limit: u32) {
    rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use super::{apply_limit, effective_limit};

    #[test]
    fn local_takes_precedence() {
        assert_eq!(effective_limit(Some(5), Some(10), 50), 5);
    }

    #[test]
    fn global_used_when_local_missing() {
        assert_eq!(effective_limit(None, Some(10), 50), 10);
    }

    #[test]
    fn fallback_used_when_none_set() {
        assert_eq!(effective_limit(None, None, 50), 50);
    }

    #[test]
    fn apply_limit_truncates() {
        let mut rows = vec![1, 2, 3];
        apply_limit(&mut rows, 2);
        assert_eq!(rows, vec![1, 2]);
        apply_limit(&mut rows, 10);
        assert_eq!(rows.len(), 2);
    }
}
