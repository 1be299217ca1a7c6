//! Entities owned by other parts of the application.
//!
//! The session store holds these values but never inspects them, apart
//! from keying roles by [`Role::id`].

mod emote_set;
mod role;

pub use emote_set::{ActiveEmote, EmoteSet};
pub use role::Role;
