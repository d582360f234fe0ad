use std::sync::Arc;

use crate::asset::SpriteId;
use crate::error::AnimationError;

/// A fixed-rate frame sequence over sprite handles.
///
/// The cursor counts ticks, not frames; each frame is shown for
/// `frame_hold` consecutive ticks. Looping sequences wrap, non-looping
/// sequences hold their last frame and raise `finished`.
#[derive(Clone, Debug)]
pub struct AnimationSequence {
    frames: Arc<[SpriteId]>,
    frame_hold: u32,
    looping: bool,
    cursor: u32,
    finished: bool,
}

impl AnimationSequence {
    pub fn new(frames: Vec<SpriteId>, frame_hold: u32, looping: bool) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptyFrames);
        }
        if frame_hold == 0 {
            return Err(AnimationError::ZeroFrameHold);
        }
        Ok(Self {
            frames: frames.into(),
            frame_hold,
            looping,
            cursor: 0,
            finished: false,
        })
    }

    /// Total cursor span, in ticks.
    fn span(&self) -> u32 {
        self.frame_hold * self.frames.len() as u32
    }

    pub fn advance(&mut self) {
        if self.looping {
            self.cursor = (self.cursor + 1) % self.span();
        } else {
            let last = self.span() - 1;
            self.cursor = (self.cursor + 1).min(last);
            if self.cursor == last {
                self.finished = true;
            }
        }
    }

    pub fn current_image(&self) -> SpriteId {
        self.frames[(self.cursor / self.frame_hold) as usize]
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// A fresh instance sharing the same frame list, cursor reset to zero.
    /// Used when an entity swaps gestures so each holder animates
    /// independently.
    pub fn duplicate(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
            frame_hold: self.frame_hold,
            looping: self.looping,
            cursor: 0,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: u32) -> Vec<SpriteId> {
        (0..n).map(SpriteId).collect()
    }

    #[test]
    fn test_rejects_empty_frames() {
        assert_eq!(
            AnimationSequence::new(vec![], 5, true).unwrap_err(),
            AnimationError::EmptyFrames
        );
    }

    #[test]
    fn test_rejects_zero_hold() {
        assert_eq!(
            AnimationSequence::new(frames(3), 0, true).unwrap_err(),
            AnimationError::ZeroFrameHold
        );
    }

    #[test]
    fn test_looping_wraps_to_first_frame() {
        let mut seq = AnimationSequence::new(frames(4), 5, true).unwrap();
        for _ in 0..20 {
            seq.advance();
        }
        // 20 ticks over a 20-tick span lands back on frame 0.
        assert_eq!(seq.current_image(), SpriteId(0));
        assert!(!seq.finished());
    }

    #[test]
    fn test_non_looping_saturates() {
        let mut seq = AnimationSequence::new(frames(3), 2, false).unwrap();
        for _ in 0..50 {
            seq.advance();
        }
        assert_eq!(seq.current_image(), SpriteId(2));
        assert!(seq.finished());
        seq.advance();
        assert_eq!(seq.current_image(), SpriteId(2));
    }

    #[test]
    fn test_duplicate_resets_cursor() {
        let mut seq = AnimationSequence::new(frames(4), 5, true).unwrap();
        for _ in 0..7 {
            seq.advance();
        }
        let copy = seq.duplicate();
        assert_eq!(copy.current_image(), SpriteId(0));
        // The original keeps its own cursor.
        assert_eq!(seq.current_image(), SpriteId(1));
    }
}
