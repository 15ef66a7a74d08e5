pub mod match_record;
pub mod team_config;
