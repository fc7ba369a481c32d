// src/services/shift.rs
//
// Utilitários puros de turno: mapeiam um instante de relógio para a "data de
// presença" correta, resolvem o início do turno em UTC, detectam turnos de fim
// de semana e classificam o atraso de um check-in. Nenhuma função faz I/O e
// todo raciocínio de relógio de parede acontece no fuso fixo de operação
// (Pakistan Standard Time, UTC+5, sem horário de verão), nunca no fuso do host.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use rust_decimal::Decimal;

use crate::models::attendance::AttendanceStatus;

// Fuso de operação: PKT, UTC+5, sem horário de verão.
pub const OPERATING_TZ_OFFSET_HOURS: i32 = 5;

// Janela de tolerância após o início do turno: dentro dela o check-in conta
// como on_time e minutes_late é reportado como 0.
pub const GRACE_MINUTES: i64 = 15;

// Acima deste atraso o check-in vira half_day em vez de late.
pub const HALF_DAY_AFTER_MINUTES: i64 = 120;

// Regras de turno e de acúmulo salarial. Os limiares e frações são
// configuração nomeada, não literais espalhados; os testes sobrescrevem
// campos individuais quando precisam.
#[derive(Debug, Clone, Copy)]
pub struct ShiftRules {
    pub tz: FixedOffset,
    pub grace_minutes: i64,
    pub half_day_after_minutes: i64,
    pub on_time_fraction: Decimal,
    pub late_fraction: Decimal,
    pub half_day_fraction: Decimal,
    pub absent_fraction: Decimal,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            tz: FixedOffset::east_opt(OPERATING_TZ_OFFSET_HOURS * 3600)
                .expect("deslocamento fixo de fuso válido"),
            grace_minutes: GRACE_MINUTES,
            half_day_after_minutes: HALF_DAY_AFTER_MINUTES,
            on_time_fraction: Decimal::ONE,
            late_fraction: Decimal::new(5, 1),
            half_day_fraction: Decimal::new(5, 1),
            absent_fraction: Decimal::ZERO,
        }
    }
}

impl ShiftRules {
    // Fração do potencial diário que cada status de presença rende.
    pub fn fraction_for(&self, status: AttendanceStatus) -> Decimal {
        match status {
            AttendanceStatus::OnTime => self.on_time_fraction,
            AttendanceStatus::Late => self.late_fraction,
            AttendanceStatus::HalfDay => self.half_day_fraction,
            AttendanceStatus::Absent | AttendanceStatus::Weekend => self.absent_fraction,
        }
    }
}

// Resultado de classify_check_in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInOutcome {
    pub status: AttendanceStatus,
    pub minutes_late: i64,
    pub message: String,
}

// Converte um relógio de parede local (no fuso de operação) para UTC por
// aritmética direta. FixedOffset nunca tem horários ambíguos, então isso é
// infalível.
fn local_to_utc(local: NaiveDateTime, tz: FixedOffset) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(local - Duration::seconds(tz.local_minus_utc() as i64)))
}

// Data de presença a que o instante `now` pertence. Regra do turno noturno:
// se shift_end < shift_start e a hora local ainda não passou de shift_end,
// o instante pertence ao turno que começou no dia anterior.
pub fn attendance_date(
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> NaiveDate {
    let local = now.with_timezone(&tz);
    let date = local.date_naive();
    if shift_end < shift_start && local.time() < shift_end {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

// Resolve em que instante UTC o turno corrente começou. Necessário para
// bucketing consistente de contadores mesmo quando relógio local e fronteira
// do turno divergem.
pub fn shift_start_instant(
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> (NaiveDate, DateTime<Utc>) {
    let date = attendance_date(shift_start, shift_end, now, tz);
    let start = local_to_utc(date.and_time(shift_start), tz);
    (date, start)
}

// Um turno é de fim de semana quando sua data de *início* cai em sábado ou
// domingo no fuso de operação. Turnos de fim de semana ficam inteiramente
// fora do controle de presença.
pub fn is_weekend_shift(
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> bool {
    let date = attendance_date(shift_start, shift_end, now, tz);
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

// Classifica um check-in contra o início do turno. Monotônica: um check-in
// mais tarde nunca produz status melhor que um mais cedo.
pub fn classify_check_in(
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    now: DateTime<Utc>,
    rules: &ShiftRules,
) -> CheckInOutcome {
    let (_, start) = shift_start_instant(shift_start, shift_end, now, rules.tz);
    let minutes = (now - start).num_minutes().max(0);

    if minutes <= rules.grace_minutes {
        CheckInOutcome {
            status: AttendanceStatus::OnTime,
            minutes_late: 0,
            message: "Check-in no horário.".to_string(),
        }
    } else if minutes <= rules.half_day_after_minutes {
        CheckInOutcome {
            status: AttendanceStatus::Late,
            minutes_late: minutes,
            message: format!("Check-in atrasado em {} minutos.", minutes),
        }
    } else {
        CheckInOutcome {
            status: AttendanceStatus::HalfDay,
            minutes_late: minutes,
            message: format!(
                "Atraso de {} minutos excede o limite: registrado como meio dia.",
                minutes
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rules() -> ShiftRules {
        ShiftRules::default()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // Instante UTC a partir de um relógio de parede PKT.
    fn pkt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        let tz = rules().tz;
        local_to_utc(
            NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_time(t(h, mi)),
            tz,
        )
    }

    #[rstest]
    // Turno noturno 21:00–05:00: 02:30 ainda pertence ao turno da véspera.
    #[case(t(21, 0), t(5, 0), pkt(2025, 8, 12, 2, 30), NaiveDate::from_ymd_opt(2025, 8, 11).unwrap())]
    // No início do turno, pertence ao dia corrente.
    #[case(t(21, 0), t(5, 0), pkt(2025, 8, 12, 21, 0), NaiveDate::from_ymd_opt(2025, 8, 12).unwrap())]
    // Depois do fim e antes do início (tarde), dia corrente.
    #[case(t(21, 0), t(5, 0), pkt(2025, 8, 12, 14, 0), NaiveDate::from_ymd_opt(2025, 8, 12).unwrap())]
    // Turno diurno comum nunca recua.
    #[case(t(9, 0), t(17, 0), pkt(2025, 8, 12, 0, 30), NaiveDate::from_ymd_opt(2025, 8, 12).unwrap())]
    fn attendance_date_overnight_rule(
        #[case] start: NaiveTime,
        #[case] end: NaiveTime,
        #[case] now: DateTime<Utc>,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(attendance_date(start, end, now, rules().tz), expected);
    }

    #[test]
    fn shift_start_instant_is_utc_minus_offset() {
        let (date, start) = shift_start_instant(t(9, 0), t(17, 0), pkt(2025, 8, 12, 10, 0), rules().tz);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 12).unwrap());
        // 09:00 PKT == 04:00 UTC
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2025, 8, 12, 4, 0, 0).unwrap()
        );
    }

    #[rstest]
    // 2025-08-16 é sábado, 2025-08-17 domingo.
    #[case(pkt(2025, 8, 16, 10, 0), true)]
    #[case(pkt(2025, 8, 17, 10, 0), true)]
    #[case(pkt(2025, 8, 15, 10, 0), false)]
    fn weekend_shift_by_start_date(#[case] now: DateTime<Utc>, #[case] expected: bool) {
        assert_eq!(is_weekend_shift(t(9, 0), t(17, 0), now, rules().tz), expected);
    }

    #[test]
    fn overnight_weekend_uses_shift_start_day() {
        // Madrugada de segunda (01:00) de um turno 21:00–05:00 iniciado no
        // domingo: ainda é turno de fim de semana.
        let monday_early = pkt(2025, 8, 18, 1, 0);
        assert!(is_weekend_shift(t(21, 0), t(5, 0), monday_early, rules().tz));
    }

    #[rstest]
    // Exemplos do turno 09:00–17:00 com tolerância de 15 minutos.
    #[case(pkt(2025, 8, 12, 9, 10), AttendanceStatus::OnTime, 0)]
    #[case(pkt(2025, 8, 12, 9, 15), AttendanceStatus::OnTime, 0)]
    #[case(pkt(2025, 8, 12, 9, 40), AttendanceStatus::Late, 40)]
    #[case(pkt(2025, 8, 12, 11, 0), AttendanceStatus::Late, 120)]
    #[case(pkt(2025, 8, 12, 11, 1), AttendanceStatus::HalfDay, 121)]
    #[case(pkt(2025, 8, 12, 8, 30), AttendanceStatus::OnTime, 0)]
    fn classify_thresholds(
        #[case] now: DateTime<Utc>,
        #[case] status: AttendanceStatus,
        #[case] minutes: i64,
    ) {
        let outcome = classify_check_in(t(9, 0), t(17, 0), now, &rules());
        assert_eq!(outcome.status, status);
        assert_eq!(outcome.minutes_late, minutes);
    }

    #[test]
    fn classification_is_monotonic() {
        let order = |s: AttendanceStatus| match s {
            AttendanceStatus::OnTime => 0,
            AttendanceStatus::Late => 1,
            _ => 2,
        };
        let mut previous = 0;
        for minute in 0..240 {
            let now = pkt(2025, 8, 12, 9, 0) + Duration::minutes(minute);
            let outcome = classify_check_in(t(9, 0), t(17, 0), now, &rules());
            let current = order(outcome.status);
            assert!(current >= previous, "regrediu no minuto {}", minute);
            previous = current;
        }
    }

    #[test]
    fn overnight_check_in_before_midnight_counts_from_shift_start() {
        // Turno 21:00–05:00, check-in 21:40 -> 40 minutos de atraso.
        let outcome = classify_check_in(t(21, 0), t(5, 0), pkt(2025, 8, 12, 21, 40), &rules());
        assert_eq!(outcome.status, AttendanceStatus::Late);
        assert_eq!(outcome.minutes_late, 40);

        // Check-in 01:00 da madrugada: 240 minutos após o início da véspera.
        let outcome = classify_check_in(t(21, 0), t(5, 0), pkt(2025, 8, 13, 1, 0), &rules());
        assert_eq!(outcome.status, AttendanceStatus::HalfDay);
        assert_eq!(outcome.minutes_late, 240);
    }
}
