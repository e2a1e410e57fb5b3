/// Live player counters shown on the dashboard
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStats {
    #[serde(default)]
    pub players: u64,
    #[serde(default)]
    pub players_online: u64,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatsResponse {
    pub stats: PlayerStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_envelope_decodes() {
        let response: StatsResponse =
            serde_json::from_str(r#"{"stats":{"players":1543,"players_online":87}}"#).unwrap();
        assert_eq!(response.stats.players, 1543);
        assert_eq!(response.stats.players_online, 87);
    }
}
