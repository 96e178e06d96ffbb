use super::Difficulty;

#[derive(Debug, Clone)]
pub enum SessionCommand {
    SelectDifficulty(Difficulty),
    SubmitGuess(String),
    RequestHint,
    ToggleMultiplayer,
    SetPlayerNames(String, String),
    ResetRound,
}
