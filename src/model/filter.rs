// Search projection over the worktree list.

use std::borrow::Cow;

use super::worktree::Worktree;

/// Worktrees whose branch, last commit subject or path contain `term`,
/// ignoring case. Order is preserved; an empty term borrows the input.
pub fn filter<'a>(worktrees: &'a [Worktree], term: &str) -> Cow<'a, [Worktree]> {
    if term.is_empty() {
        return Cow::Borrowed(worktrees);
    }
    let needle = term.to_lowercase();
    Cow::Owned(
        worktrees
            .iter()
            .filter(|wt| matches(wt, &needle))
            .cloned()
            .collect(),
    )
}

fn matches(wt: &Worktree, needle: &str) -> bool {
    wt.branch.to_lowercase().contains(needle)
        || wt.last_commit.subject.to_lowercase().contains(needle)
        || wt.path.to_string_lossy().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wt(path: &str, branch: &str, subject: &str) -> Worktree {
        let mut w = Worktree::new(path);
        w.branch = branch.to_string();
        w.last_commit.subject = subject.to_string();
        w
    }

    fn sample() -> Vec<Worktree> {
        vec![
            wt("/repo", "main", "Initial commit"),
            wt("/repo/.worktrees/feature-x", "feature/x", "fix bug"),
            wt("/repo/.worktrees/docs", "docs", "Update README"),
        ]
    }

    #[test]
    fn empty_term_is_identity() {
        let all = sample();
        let out = filter(&all, "");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), all.as_slice());
    }

    #[test]
    fn matches_branch_case_insensitively() {
        let all = sample();
        let out = filter(&all, "FEATUR");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].branch, "feature/x");
    }

    #[test]
    fn matches_subject_or_path() {
        let all = sample();
        assert_eq!(filter(&all, "readme")[0].branch, "docs");
        // "worktrees" only appears in paths
        let by_path: Vec<_> = filter(&all, "worktrees").iter().map(|w| w.branch.clone()).collect();
        assert_eq!(by_path, vec!["feature/x", "docs"]);
    }

    #[test]
    fn result_is_ordered_subsequence() {
        let all = sample();
        let out = filter(&all, "e");
        let mut last = 0;
        for w in out.iter() {
            let idx = all.iter().position(|a| a == w).unwrap();
            assert!(idx >= last);
            last = idx;
        }
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter(&sample(), "zzz").is_empty());
    }
}
