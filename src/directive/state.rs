use crate::error::Location;

/// Branch state of one `#if` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// The current branch is being emitted.
    Active,
    /// A branch was already taken, or the whole frame sits in a suppressed
    /// region; nothing in this frame will be emitted again.
    BranchTaken,
    /// No branch was taken yet; a later `#elif` or `#else` may activate.
    AwaitingBranch,
}

/// One level of conditional nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub state:     BranchState,
    pub else_seen: bool,
    /// The directive that opened the frame.
    pub opened:    Location,
}

/// Why a nesting transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestingError {
    /// `#elif`, `#else`, or `#endif` with no open frame.
    NoOpenFrame,
    /// `#elif` after `#else` in the same frame.
    ElifAfterElse,
    /// A second `#else` in the same frame.
    RepeatedElse,
}

impl NestingError {
    /// A short description used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NoOpenFrame => "no matching #if",
            Self::ElifAfterElse => "#elif after #else",
            Self::RepeatedElse => "#else already seen for this #if",
        }
    }
}

/// The stack of open `#if` frames.
///
/// A line is emitted only while every frame is [`BranchState::Active`].
///
/// # Example
/// ```
/// use sift::{directive::state::NestingStack, error::Location};
///
/// let mut stack = NestingStack::default();
/// stack.push(false, Location::default());
/// assert!(!stack.is_active());
///
/// // `#elif` asks for a condition only while no branch was taken.
/// assert_eq!(stack.wants_condition(), Ok(true));
/// stack.elif(Some(true)).unwrap();
/// assert!(stack.is_active());
///
/// stack.else_branch().unwrap();
/// assert!(!stack.is_active());
/// assert!(stack.else_branch().is_err());
///
/// stack.pop().unwrap();
/// assert!(stack.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NestingStack {
    frames: Vec<Frame>,
}

impl NestingStack {
    /// Returns `true` if every open frame is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.frames.iter().all(|frame| frame.state == BranchState::Active)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost open frame.
    #[must_use]
    pub fn innermost(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Opens a frame for an evaluated condition in an active region.
    pub fn push(&mut self, condition: bool, opened: Location) {
        let state = if condition { BranchState::Active } else { BranchState::AwaitingBranch };
        self.frames.push(Frame { state,
                                 else_seen: false,
                                 opened });
    }

    /// Opens a frame inside a suppressed region. None of its branches can
    /// become active.
    pub fn push_suppressed(&mut self, opened: Location) {
        self.frames.push(Frame { state: BranchState::BranchTaken,
                                 else_seen: false,
                                 opened });
    }

    /// Tells an `#elif` whether its condition must be evaluated.
    ///
    /// # Errors
    /// `NoOpenFrame` or `ElifAfterElse`.
    pub fn wants_condition(&self) -> Result<bool, NestingError> {
        let frame = self.frames.last().ok_or(NestingError::NoOpenFrame)?;
        if frame.else_seen {
            return Err(NestingError::ElifAfterElse);
        }
        Ok(frame.state == BranchState::AwaitingBranch)
    }

    /// Applies an `#elif`. `condition` is the evaluated condition, or `None`
    /// when [`wants_condition`](Self::wants_condition) said no evaluation was
    /// needed.
    ///
    /// # Errors
    /// `NoOpenFrame` or `ElifAfterElse`.
    pub fn elif(&mut self, condition: Option<bool>) -> Result<(), NestingError> {
        let frame = self.frames.last_mut().ok_or(NestingError::NoOpenFrame)?;
        if frame.else_seen {
            return Err(NestingError::ElifAfterElse);
        }
        frame.state = match (frame.state, condition) {
            (BranchState::Active, _) => BranchState::BranchTaken,
            (BranchState::AwaitingBranch, Some(true)) => BranchState::Active,
            (state, _) => state,
        };
        Ok(())
    }

    /// Applies an `#else`.
    ///
    /// # Errors
    /// `NoOpenFrame` or `RepeatedElse`.
    pub fn else_branch(&mut self) -> Result<(), NestingError> {
        let frame = self.frames.last_mut().ok_or(NestingError::NoOpenFrame)?;
        if frame.else_seen {
            return Err(NestingError::RepeatedElse);
        }
        frame.else_seen = true;
        frame.state = match frame.state {
            BranchState::AwaitingBranch => BranchState::Active,
            BranchState::Active | BranchState::BranchTaken => BranchState::BranchTaken,
        };
        Ok(())
    }

    /// Applies an `#endif`, returning the closed frame.
    ///
    /// # Errors
    /// `NoOpenFrame`.
    pub fn pop(&mut self) -> Result<Frame, NestingError> {
        self.frames.pop().ok_or(NestingError::NoOpenFrame)
    }

    /// Drops frames until at most `depth` remain.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }
}
