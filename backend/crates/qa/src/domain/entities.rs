//! Domain Entities
//!
//! Core business entities for the Q&A domain.

use crate::domain::value_objects::{QuestionText, UserId};
use crate::error::{QaError, QaResult};

/// Question entity - one record per question in a session
///
/// `likers` has set semantics and keeps insertion order. `up_votes` always
/// equals `likers.len()`; every transition updates both together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: QuestionText,
    pub asker: UserId,
    up_votes: u64,
    likers: Vec<UserId>,
}

/// Outcome of rebuilding a question from stored fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Repeated liker entries that were dropped
    pub duplicate_likers: usize,
    /// Stored vote counter, when it disagreed with the liker count
    pub stale_up_votes: Option<i64>,
}

impl Reconciliation {
    pub fn is_clean(&self) -> bool {
        self.duplicate_likers == 0 && self.stale_up_votes.is_none()
    }
}

impl Question {
    /// A newly asked question starts liked by its asker
    pub fn ask(text: QuestionText, asker: UserId) -> Self {
        Self {
            text,
            likers: vec![asker.clone()],
            asker,
            up_votes: 1,
        }
    }

    /// Rebuild a question from stored fields
    ///
    /// Duplicate likers are collapsed (first occurrence kept) and the vote
    /// counter is recomputed from the liker count.
    pub fn restore(
        text: QuestionText,
        asker: UserId,
        stored_up_votes: i64,
        stored_likers: Vec<UserId>,
    ) -> (Self, Reconciliation) {
        let mut likers: Vec<UserId> = Vec::with_capacity(stored_likers.len());
        let mut duplicate_likers = 0;
        for liker in stored_likers {
            if likers.contains(&liker) {
                duplicate_likers += 1;
            } else {
                likers.push(liker);
            }
        }

        let up_votes = likers.len() as u64;
        let stale_up_votes =
            (i64::try_from(up_votes).ok() != Some(stored_up_votes)).then_some(stored_up_votes);

        let question = Self {
            text,
            asker,
            up_votes,
            likers,
        };
        let reconciliation = Reconciliation {
            duplicate_likers,
            stale_up_votes,
        };
        (question, reconciliation)
    }

    pub fn up_votes(&self) -> u64 {
        self.up_votes
    }

    pub fn likers(&self) -> &[UserId] {
        &self.likers
    }

    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.likers.contains(user)
    }

    /// not-liked -> liked
    pub fn upvote(&mut self, user: UserId) -> QaResult<()> {
        if self.is_liked_by(&user) {
            return Err(QaError::AlreadyLiked);
        }
        self.likers.push(user);
        self.up_votes += 1;
        Ok(())
    }

    /// liked -> not-liked; the asker can never leave the liked state
    pub fn downvote(&mut self, user: &UserId) -> QaResult<()> {
        let Some(position) = self.likers.iter().position(|liker| liker == user) else {
            return Err(QaError::NeverLiked);
        };
        if *user == self.asker {
            return Err(QaError::OwnQuestion);
        }
        self.likers.remove(position);
        self.up_votes -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::parse(Some(id)).unwrap()
    }

    fn question(asker: &str) -> Question {
        let text = QuestionText::parse(Some("Is this a valid test question?")).unwrap();
        Question::ask(text, user(asker))
    }

    #[test]
    fn test_ask_starts_with_asker_vote() {
        let q = question("u1");
        assert_eq!(q.up_votes(), 1);
        assert_eq!(q.likers(), &[user("u1")]);
    }

    #[test]
    fn test_upvote_then_downvote() {
        let mut q = question("u1");
        q.upvote(user("u2")).unwrap();
        assert_eq!(q.up_votes(), 2);
        assert_eq!(q.likers(), &[user("u1"), user("u2")]);

        q.downvote(&user("u2")).unwrap();
        assert_eq!(q.up_votes(), 1);
        assert_eq!(q.likers(), &[user("u1")]);
    }

    #[test]
    fn test_upvote_twice_conflicts_and_leaves_state() {
        let mut q = question("u1");
        q.upvote(user("u2")).unwrap();
        let before = q.clone();

        assert!(matches!(q.upvote(user("u2")), Err(QaError::AlreadyLiked)));
        assert!(matches!(q.upvote(user("u1")), Err(QaError::AlreadyLiked)));
        assert_eq!(q, before);
    }

    #[test]
    fn test_downvote_without_like_conflicts() {
        let mut q = question("u1");
        assert!(matches!(q.downvote(&user("u3")), Err(QaError::NeverLiked)));
        assert_eq!(q.up_votes(), 1);
    }

    #[test]
    fn test_asker_cannot_downvote() {
        let mut q = question("u1");
        q.upvote(user("u2")).unwrap();
        assert!(matches!(q.downvote(&user("u1")), Err(QaError::OwnQuestion)));
        assert_eq!(q.up_votes(), 2);
    }

    #[test]
    fn test_membership_is_checked_before_ownership() {
        // Asker missing from likers (e.g. edited by hand in the store)
        let text = QuestionText::from_stored("Is this a valid test question?".into());
        let (mut q, _) = Question::restore(text, user("u1"), 1, vec![user("u2")]);
        assert!(matches!(q.downvote(&user("u1")), Err(QaError::NeverLiked)));
    }

    #[test]
    fn test_downvote_keeps_order_of_remaining_likers() {
        let mut q = question("u1");
        for u in ["u2", "u3", "u4"] {
            q.upvote(user(u)).unwrap();
        }
        q.downvote(&user("u3")).unwrap();
        assert_eq!(q.likers(), &[user("u1"), user("u2"), user("u4")]);
        assert_eq!(q.up_votes(), 3);
    }

    #[test]
    fn test_restore_clean() {
        let text = QuestionText::from_stored("This is a question for a test ?".into());
        let (q, rec) = Question::restore(text, user("1"), 2, vec![user("1"), user("2")]);
        assert!(rec.is_clean());
        assert_eq!(q.up_votes(), 2);
    }

    #[test]
    fn test_restore_reconciles_counter_and_duplicates() {
        let text = QuestionText::from_stored("This is a question for a test ?".into());
        let (q, rec) = Question::restore(
            text,
            user("1"),
            7,
            vec![user("1"), user("2"), user("1")],
        );
        assert_eq!(rec.duplicate_likers, 1);
        assert_eq!(rec.stale_up_votes, Some(7));
        assert_eq!(q.likers(), &[user("1"), user("2")]);
        assert_eq!(q.up_votes(), 2);
    }
}
