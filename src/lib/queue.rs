//! Edits on a copy of a player's queue.
//!
//! The node client owns the queue. Commands take a snapshot, edit it here
//! and write it back with [replace](lavalink_rs::player_context::QueueRef::replace).

use std::collections::VecDeque;

use rand::seq::SliceRandom;

use crate::error::UserError;

/// Turn the `top` argument into a 1 based position. A missing index counts as 0.
pub fn position(index: Option<i64>) -> Result<usize, UserError> {
    match index.unwrap_or(0) {
        index if index <= 0 => Err(UserError::BadIndex),
        index => usize::try_from(index).map_err(|_| UserError::BadIndex),
    }
}

/// Move the track at the 1 based `position` to the front of the queue.
pub fn move_to_front<T>(queue: &mut VecDeque<T>, position: usize) -> Result<(), UserError> {
    if position == 0 {
        return Err(UserError::BadIndex);
    }

    let track = queue.remove(position - 1).ok_or(UserError::NoTrackAt {
        position,
        len: queue.len(),
    })?;
    queue.push_front(track);
    Ok(())
}

/// Shuffle the queue in place.
pub fn shuffle<T>(queue: &mut VecDeque<T>) -> Result<(), UserError> {
    if queue.is_empty() {
        return Err(UserError::EmptyQueue);
    }
    queue.make_contiguous().shuffle(&mut rand::thread_rng());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn moves_track_to_front() {
        let mut queue: VecDeque<_> = ["a", "b", "c", "d"].into();
        move_to_front(&mut queue, 3).unwrap();
        assert_eq!(queue, VecDeque::from(["c", "a", "b", "d"]));
    }

    #[test]
    fn moving_first_track_changes_nothing() {
        let mut queue: VecDeque<_> = ["a", "b"].into();
        move_to_front(&mut queue, 1).unwrap();
        assert_eq!(queue, VecDeque::from(["a", "b"]));
    }

    #[test]
    fn zero_position_is_rejected() {
        let mut queue: VecDeque<_> = ["a"].into();
        assert!(matches!(
            move_to_front(&mut queue, 0),
            Err(UserError::BadIndex)
        ));
    }

    #[test]
    fn missing_or_negative_index_is_rejected() {
        for index in [None, Some(0), Some(-1), Some(i64::MIN)] {
            assert!(
                matches!(position(index), Err(UserError::BadIndex)),
                "{index:?}"
            );
        }
        assert_eq!(
            UserError::BadIndex.to_string(),
            "Track index must be more than 0"
        );
    }

    #[test]
    fn positive_index_is_kept() {
        assert_eq!(position(Some(3)).unwrap(), 3);
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let mut queue: VecDeque<_> = ["a", "b"].into();
        assert!(matches!(
            move_to_front(&mut queue, 3),
            Err(UserError::NoTrackAt { position: 3, len: 2 })
        ));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn shuffle_keeps_every_track() {
        let mut queue: VecDeque<u32> = (0..50).collect();
        shuffle(&mut queue).unwrap();

        let mut sorted: Vec<_> = queue.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_empty_queue_errors() {
        let mut queue: VecDeque<u32> = VecDeque::new();
        assert!(matches!(shuffle(&mut queue), Err(UserError::EmptyQueue)));
    }
}
