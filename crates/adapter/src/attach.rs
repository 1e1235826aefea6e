//! Attaching the control reactions to a game message.

use anyhow::Result;

use crate::core::ControlSet;
use crate::pacing::{pause, PacingPolicy};
use crate::transport::ChatTransport;
use crate::types::MessageId;

/// Replace every reaction on `message` with `controls`, in order.
///
/// Prior reactions are cleared first, so attaching the same set twice ends
/// in the same state.
pub async fn attach_controls<T>(
    transport: &T,
    message: MessageId,
    controls: &ControlSet,
    pacing: &PacingPolicy,
) -> Result<()>
where
    T: ChatTransport,
{
    transport.clear_reactions(message).await?;
    for sym in controls.as_slice() {
        pause(pacing.between_reactions).await;
        transport.add_reaction(message, sym).await?;
    }
    Ok(())
}
