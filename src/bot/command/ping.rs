//! `/ping`.

use serenity::all::{CreateCommand, Mentionable, UserId};

pub fn ping() -> CreateCommand {
    CreateCommand::new("ping").description("Check that the bot is alive")
}

pub fn run_ping(user_id: UserId) -> String {
    format!("Pong! thanks for checking on me {} !", user_id.mention())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_the_caller() {
        let reply = run_ping(UserId::new(501));

        assert_eq!(reply, "Pong! thanks for checking on me <@501> !");
    }
}
