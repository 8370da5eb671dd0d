mod buff_session;

pub use buff_session::{BuffActivation, BuffSession, CardActivation, FrameOutcome, SessionError};
