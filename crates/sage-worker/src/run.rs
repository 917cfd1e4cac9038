//! Session wiring and the transcript → reply loop.

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::segment::SpeechSegmenter;
use sage_llm::TutorAgent;
use sage_voice::{AgentSession, AvatarSession, TokenService, TranscriptEvent};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Identity the avatar participant joins the room with.
const AVATAR_IDENTITY: &str = "sage-avatar";

/// Connects the session, opens the lesson, and serves transcripts until
/// shutdown.
pub async fn run(config: WorkerConfig) -> Result<(), WorkerError> {
    let token_service = TokenService::new(config.livekit.clone());
    if !token_service.is_enabled() {
        return Err(WorkerError::Config(
            "LiveKit credentials are not configured; set livekit.url and \
             livekit.api_key (or LIVEKIT_* env vars)"
                .to_string(),
        ));
    }

    let room = &config.agent.room;
    let identity = &config.agent.identity;

    // The room is auto-created on first join; creating it up front just
    // surfaces credential problems before the session starts.
    if let Err(e) = token_service.create_room(room).await {
        warn!(room = %room, "room pre-creation failed, continuing: {}", e);
    }

    match token_service.participant_count(room).await {
        Ok(count) => info!(room = %room, count, "room occupancy before join"),
        Err(e) => warn!(room = %room, "occupancy query failed: {}", e),
    }

    let token = token_service.generate_join_token(room, identity, identity)?;
    let session = Arc::new(
        AgentSession::connect(
            token_service.get_url(),
            &token,
            room,
            config.agent.components.clone(),
        )
        .await?,
    );
    info!(room = %room, identity = %identity, "agent session connected");

    if let Some(avatar_config) = config.avatar.clone() {
        let avatar_token =
            token_service.generate_join_token(room, AVATAR_IDENTITY, AVATAR_IDENTITY)?;
        let avatar = AvatarSession::new(avatar_config);
        let session_id = avatar
            .start(token_service.get_public_url(), &avatar_token, room)
            .await?;
        info!(
            avatar_id = avatar.avatar_id(),
            session_id = %session_id,
            "avatar rendering started"
        );
    } else {
        info!("no avatar configured, running audio-only");
    }

    let mut agent = TutorAgent::new(config.llm.clone());

    // Kick the lesson off before the learner says anything.
    match speak_reply(&session, &mut agent, None).await {
        Ok(reply) => info!(chars = reply.len(), "lesson opened"),
        Err(e) => error!("failed to open lesson: {}", e),
    }

    let mut transcripts = session.subscribe_transcripts();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            event = transcripts.recv() => match event {
                Ok(event) => handle_transcript(&session, &mut agent, event, identity).await,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "transcript stream lagged, utterances dropped");
                }
                Err(RecvError::Closed) => {
                    info!("transcript stream closed, stopping");
                    break;
                }
            },
        }
    }

    session.disconnect().await;
    Ok(())
}

/// Feeds one learner turn through the tutor and speaks the streamed reply.
async fn handle_transcript(
    session: &Arc<AgentSession>,
    agent: &mut TutorAgent,
    event: TranscriptEvent,
    own_identity: &str,
) {
    // The platform also transcribes the agent's own audio track.
    if event.participant_identity == own_identity || event.participant_identity == AVATAR_IDENTITY {
        return;
    }
    if event.text.trim().is_empty() {
        return;
    }

    info!(
        speaker = %event.participant_identity,
        chars = event.text.len(),
        "learner turn received"
    );

    match speak_reply(session, agent, Some(&event.text)).await {
        Ok(reply) => info!(chars = reply.len(), "tutor reply spoken"),
        // Per-turn failures must not kill the session; the learner can retry.
        Err(e) => error!("tutor reply failed: {}", e),
    }
}

/// Streams one tutor reply into the room, speaking segments as they form
/// rather than waiting for the full text.
///
/// `user_text` of `None` opens the lesson with the fixed instruction.
async fn speak_reply(
    session: &Arc<AgentSession>,
    agent: &mut TutorAgent,
    user_text: Option<&str>,
) -> Result<String, WorkerError> {
    let (segment_tx, mut segment_rx) = mpsc::unbounded_channel::<String>();

    let speaker = {
        let session = Arc::clone(session);
        tokio::spawn(async move {
            while let Some(segment) = segment_rx.recv().await {
                if let Err(e) = session.speak(&segment).await {
                    warn!("failed to speak segment: {}", e);
                }
            }
        })
    };

    let mut segmenter = SpeechSegmenter::default();
    let tx = segment_tx.clone();
    let mut on_token = |token: &str| {
        if let Some(segment) = segmenter.push(token) {
            let _ = tx.send(segment);
        }
    };

    let result = match user_text {
        Some(text) => agent.respond(text, &mut on_token).await,
        None => agent.open_lesson(&mut on_token).await,
    };
    drop(on_token);
    drop(tx);

    // Trailing clause without a sentence boundary.
    if let Some(rest) = segmenter.finish() {
        let _ = segment_tx.send(rest);
    }
    drop(segment_tx);

    if let Err(e) = speaker.await {
        warn!("speaker task join error: {}", e);
    }

    Ok(result?)
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
