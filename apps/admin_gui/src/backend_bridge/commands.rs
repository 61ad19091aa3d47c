//! Backend commands queued from UI to backend worker.

use shared::domain::ChallengeId;
use shared::protocol::{ApproveChallengeRequest, CreateChallengeRequest};

pub enum BackendCommand {
    Login {
        server_url: String,
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    CreateChallenge {
        request: CreateChallengeRequest,
    },
    FetchChallenge {
        challenge_id: ChallengeId,
    },
    ApproveChallenge {
        challenge_id: ChallengeId,
        request: ApproveChallengeRequest,
    },
    DeleteChallenge {
        challenge_id: ChallengeId,
    },
}
