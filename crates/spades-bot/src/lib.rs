pub mod bot;
pub mod policy;

pub use bot::{BotContext, BotDifficulty, Decision, PlayPlanner, Rule};
pub use policy::{Policy, PolicyContext, RuleTablePolicy, bot_choose};
