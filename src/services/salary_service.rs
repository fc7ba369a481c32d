// src/services/salary_service.rs
//
// Acúmulo salarial derivado da presença: o salário-base vira um potencial
// diário (base / dias úteis do mês) e cada dia útil decorrido rende uma
// fração desse potencial conforme o status registrado. Dias de fim de semana
// ficam fora do numerador e do denominador.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, StatsRepository},
    models::{
        attendance::{AttendanceDay, AttendanceStatus},
        auth::User,
        stats::{DailyStats, DashboardData, SalarySummary},
    },
    services::{
        clock::SharedClock,
        shift::{attendance_date, ShiftRules},
    },
};

// Dias úteis do calendário: segunda a sexta.
pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    month_dates(year, month)
        .filter(|d| !is_weekend_day(*d))
        .count() as u32
}

fn is_weekend_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn month_dates(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    std::iter::successors(first, move |d| {
        d.succ_opt().filter(|next| next.month() == month)
    })
}

// Computação pura sobre o mês de `today`. Dias úteis decorridos sem registro
// contam como ausência; a projeção assume on_time nos dias restantes, então
// projected_salary >= total_earned sempre.
pub fn compute_salary(
    base_salary: Decimal,
    days: &[AttendanceDay],
    today: NaiveDate,
    rules: &ShiftRules,
) -> SalarySummary {
    let by_date: HashMap<NaiveDate, AttendanceStatus> =
        days.iter().map(|d| (d.date, d.status)).collect();

    let working_days = working_days_in_month(today.year(), today.month());
    let daily_potential = if working_days == 0 {
        Decimal::ZERO
    } else {
        base_salary / Decimal::from(working_days)
    };

    let mut total_earned = Decimal::ZERO;
    let mut elapsed = 0u32;
    let mut on_time_days = 0u32;
    let mut late_days = 0u32;
    let mut half_days = 0u32;
    let mut absent_days = 0u32;

    for date in month_dates(today.year(), today.month()) {
        if is_weekend_day(date) || date > today {
            continue;
        }
        elapsed += 1;
        let status = by_date
            .get(&date)
            .copied()
            .unwrap_or(AttendanceStatus::Absent);
        match status {
            AttendanceStatus::OnTime => on_time_days += 1,
            AttendanceStatus::Late => late_days += 1,
            AttendanceStatus::HalfDay => half_days += 1,
            AttendanceStatus::Absent | AttendanceStatus::Weekend => absent_days += 1,
        }
        total_earned += daily_potential * rules.fraction_for(status);
    }

    let remaining = working_days.saturating_sub(elapsed);
    let projected_salary =
        total_earned + daily_potential * rules.on_time_fraction * Decimal::from(remaining);

    SalarySummary {
        base_salary,
        daily_potential: daily_potential.round_dp(2),
        total_earned: total_earned.round_dp(2),
        projected_salary: projected_salary.round_dp(2),
        working_days,
        working_days_elapsed: elapsed,
        on_time_days,
        late_days,
        half_days,
        absent_days,
    }
}

#[derive(Clone)]
pub struct SalaryService {
    attendance_repo: AttendanceRepository,
    stats_repo: StatsRepository,
    rules: ShiftRules,
    clock: SharedClock,
}

impl SalaryService {
    pub fn new(
        attendance_repo: AttendanceRepository,
        stats_repo: StatsRepository,
        rules: ShiftRules,
        clock: SharedClock,
    ) -> Self {
        Self {
            attendance_repo,
            stats_repo,
            rules,
            clock,
        }
    }

    // Painel do agente: resumo salarial do mês corrente + contadores de hoje,
    // ambos na data de turno do usuário (não na data de parede do host).
    pub async fn dashboard(&self, user: &User) -> Result<DashboardData, AppError> {
        let now = self.clock.now_utc();
        let today = attendance_date(user.shift_start, user.shift_end, now, self.rules.tz);
        let month_start = today
            .with_day(1)
            .ok_or_else(|| anyhow::anyhow!("primeiro dia do mês inválido"))?;

        let days = self
            .attendance_repo
            .list_days_in_range(user.id, month_start, today)
            .await?;
        let salary = compute_salary(user.base_salary, &days, today, &self.rules);

        let today_stats = self
            .stats_repo
            .find_by_day(user.id, today)
            .await?
            .unwrap_or(DailyStats {
                user_id: user.id,
                date: today,
                calls_count: 0,
                talk_time_seconds: 0,
                leads_count: 0,
                sales_amount: Decimal::ZERO,
            });

        Ok(DashboardData {
            salary,
            today: today_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, status: AttendanceStatus) -> AttendanceDay {
        AttendanceDay {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            status,
        }
    }

    #[test]
    fn august_2025_has_21_working_days() {
        assert_eq!(working_days_in_month(2025, 8), 21);
    }

    #[test]
    fn earned_sums_fractions_over_elapsed_working_days() {
        let rules = ShiftRules::default();
        // Base 21000 em agosto/2025 (21 dias úteis) -> potencial diário 1000.
        let base = Decimal::from(21_000);
        let today = NaiveDate::from_ymd_opt(2025, 8, 8).unwrap(); // sexta
        let days = vec![
            day(2025, 8, 1, AttendanceStatus::OnTime),
            day(2025, 8, 4, AttendanceStatus::OnTime),
            day(2025, 8, 5, AttendanceStatus::Late),
            day(2025, 8, 6, AttendanceStatus::HalfDay),
            // 7 sem registro -> ausente implícito
            day(2025, 8, 8, AttendanceStatus::Absent),
        ];

        let summary = compute_salary(base, &days, today, &rules);
        assert_eq!(summary.daily_potential, Decimal::from(1000));
        assert_eq!(summary.working_days, 21);
        assert_eq!(summary.working_days_elapsed, 6);
        assert_eq!(summary.on_time_days, 2);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.absent_days, 2);
        // 2*1000 + 0.5*1000 + 0.5*1000 = 3000
        assert_eq!(summary.total_earned, Decimal::from(3000));
        // 15 dias úteis restantes assumidos on_time
        assert_eq!(summary.projected_salary, Decimal::from(18_000));
    }

    #[test]
    fn weekend_days_stay_out_of_both_sides() {
        let rules = ShiftRules::default();
        let base = Decimal::from(21_000);
        let today = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(); // segunda
        // Registro weekend no dia 2 (sábado) não conta nem soma.
        let days = vec![
            day(2025, 8, 1, AttendanceStatus::OnTime),
            day(2025, 8, 2, AttendanceStatus::Weekend),
            day(2025, 8, 4, AttendanceStatus::OnTime),
        ];

        let summary = compute_salary(base, &days, today, &rules);
        assert_eq!(summary.working_days_elapsed, 2);
        assert_eq!(summary.total_earned, Decimal::from(2000));
    }

    #[test]
    fn projection_never_below_earned() {
        let rules = ShiftRules::default();
        let base = Decimal::from(50_000);
        for d in 1..=31u32 {
            let today = NaiveDate::from_ymd_opt(2025, 8, d).unwrap();
            let summary = compute_salary(base, &[], today, &rules);
            assert!(summary.projected_salary >= summary.total_earned);
        }
    }

    #[test]
    fn full_on_time_month_earns_full_base() {
        let rules = ShiftRules::default();
        let base = Decimal::from(21_000);
        let today = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let days: Vec<AttendanceDay> = month_dates(2025, 8)
            .filter(|d| !is_weekend_day(*d))
            .map(|date| AttendanceDay {
                date,
                status: AttendanceStatus::OnTime,
            })
            .collect();

        let summary = compute_salary(base, &days, today, &rules);
        assert_eq!(summary.total_earned, Decimal::from(21_000));
        assert_eq!(summary.projected_salary, Decimal::from(21_000));
    }
}
