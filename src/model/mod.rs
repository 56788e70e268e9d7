pub mod filter;
pub mod worktree;
