// src/services/leaderboard_service.rs

use chrono::Datelike;

use crate::{
    common::error::AppError,
    db::LeaderboardRepository,
    models::leaderboard::{LeaderboardEntry, LeaderboardPeriod},
    services::{clock::SharedClock, shift::ShiftRules},
};

// Ordenação do ranking: chamadas desc, depois tempo falado desc. O sort é
// estável, então empates preservam a ordem das linhas de origem.
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.calls_count
            .cmp(&a.calls_count)
            .then(b.talk_time_seconds.cmp(&a.talk_time_seconds))
    });
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = (index + 1) as i64;
    }
    entries
}

#[derive(Clone)]
pub struct LeaderboardService {
    repo: LeaderboardRepository,
    rules: ShiftRules,
    clock: SharedClock,
}

impl LeaderboardService {
    pub fn new(repo: LeaderboardRepository, rules: ShiftRules, clock: SharedClock) -> Self {
        Self { repo, rules, clock }
    }

    // Ranking do dia ou do mês corrente (até hoje), na data de calendário do
    // fuso de operação.
    pub async fn ranking(
        &self,
        period: LeaderboardPeriod,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let today = self.clock.now_utc().with_timezone(&self.rules.tz).date_naive();
        let from = match period {
            LeaderboardPeriod::Daily => today,
            LeaderboardPeriod::Monthly => today
                .with_day(1)
                .ok_or_else(|| anyhow::anyhow!("primeiro dia do mês inválido"))?,
        };

        let entries = self.repo.totals_for_range(from, today).await?;
        Ok(rank(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: i64, calls: i64, talk: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 0,
            user_id,
            full_name: format!("Agente {}", user_id),
            extension: format!("10{}", user_id),
            calls_count: calls,
            talk_time_seconds: talk,
            leads_count: 0,
        }
    }

    #[test]
    fn ranks_by_calls_then_talk_time() {
        let ranked = rank(vec![
            entry(1, 5, 100),
            entry(2, 9, 50),
            entry(3, 5, 300),
        ]);
        let order: Vec<i64> = ranked.iter().map(|e| e.user_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn zero_activity_agents_stay_ranked_last_with_zeros() {
        let ranked = rank(vec![
            entry(1, 0, 0),
            entry(2, 3, 10),
            entry(3, 0, 0),
        ]);
        let order: Vec<i64> = ranked.iter().map(|e| e.user_id).collect();
        // Agentes zerados aparecem, por último, na ordem de origem (estável).
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(ranked[1].calls_count, 0);
        assert_eq!(ranked[1].talk_time_seconds, 0);
        assert_eq!(ranked[2].rank, 3);
    }
}
