//! Public feed visibility.
//!
//! A post is shown to the public iff its status is `Active`. This is read-only;
//! only moderation transitions change status.

use domains::Post;

pub fn is_public(post: &Post) -> bool {
    post.status.is_public()
}

/// Drops anything the public must not see from a feed read.
pub fn public_only(posts: Vec<Post>) -> Vec<Post> {
    posts.into_iter().filter(is_public).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Mood, PostStatus};

    #[test]
    fn only_active_posts_are_public() {
        let active = Post::new("u".into(), "a".into(), Mood::Joy, None, "Anonymous".into());
        let mut reported = active.clone();
        reported.status = PostStatus::Reported;

        assert!(is_public(&active));
        assert!(!is_public(&reported));
        assert_eq!(public_only(vec![active.clone(), reported]), vec![active]);
    }
}
