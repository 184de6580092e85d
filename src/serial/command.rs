//! ASCII command protocol.
//!
//! The host sends one command per line:
//!
//! | Line                    | Effect                               |
//! |-------------------------|--------------------------------------|
//! | `SET,HUMID,<n>`         | moisture setpoint (low 16 bits)      |
//! | `SET,TEMP,<n>`          | temperature setpoint (low 16 bits)   |
//! | `SET,LDR,<n>`           | light threshold (low 16 bits)        |
//! | `SET,FOTO,<n>`          | photoperiod on iff `n == 1`          |
//! | `SET,META_LUZ,<n>`      | daily light goal in seconds          |
//! | `RESET,TIMER_LUZ`       | zero the light-seconds counter       |
//!
//! Matching is by substring, tried in the order above; the first pattern
//! found anywhere in the line wins. The value is taken from the text after
//! the *last* comma and parsed leniently: leading whitespace and a sign are
//! accepted, parsing stops at the first non-digit, no digits means 0 and
//! overflow saturates at the 32-bit limits. Anything that matches no
//! pattern is ignored without a reply.

use core::fmt;

use log::debug;

use crate::state::SharedState;

/// Longest line [`Command::encode`] can produce.
pub const ENCODED_MAX: usize = 32;

/// A recognised host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMoistureSetpoint(u16),
    SetTemperatureSetpoint(u16),
    SetLightThreshold(u16),
    SetPhotoperiod(bool),
    SetDailyLightGoal(u32),
    ResetLightTimer,
}

#[derive(Clone, Copy)]
enum Keyword {
    Humid,
    Temp,
    Ldr,
    Foto,
    MetaLuz,
    ResetTimer,
}

/// Patterns in match priority order.
const PATTERNS: [(&[u8], Keyword); 6] = [
    (b"SET,HUMID,", Keyword::Humid),
    (b"SET,TEMP,", Keyword::Temp),
    (b"SET,LDR,", Keyword::Ldr),
    (b"SET,FOTO,", Keyword::Foto),
    (b"SET,META_LUZ,", Keyword::MetaLuz),
    (b"RESET,TIMER_LUZ", Keyword::ResetTimer),
];

/// Parse one line. Returns `None` for anything unrecognised.
pub fn parse_command(line: &[u8]) -> Option<Command> {
    // The line is a C string: it ends at the first NUL.
    let line = match line.iter().position(|&b| b == 0) {
        Some(end) => &line[..end],
        None => line,
    };

    let (_, keyword) = PATTERNS
        .iter()
        .find(|(pattern, _)| contains(line, pattern))?;

    let value = || lenient_atoi(after_last_comma(line));

    Some(match keyword {
        Keyword::Humid => Command::SetMoistureSetpoint(value() as u16),
        Keyword::Temp => Command::SetTemperatureSetpoint(value() as u16),
        Keyword::Ldr => Command::SetLightThreshold(value() as u16),
        Keyword::Foto => Command::SetPhotoperiod(value() as u16 == 1),
        Keyword::MetaLuz => Command::SetDailyLightGoal(value() as u32),
        Keyword::ResetTimer => Command::ResetLightTimer,
    })
}

/// Parse `line` and apply it to `shared`. Unknown input changes nothing.
pub fn dispatch(line: &[u8], shared: &SharedState) -> Option<Command> {
    let cmd = parse_command(line)?;
    cmd.apply(shared);
    Some(cmd)
}

impl Command {
    /// Apply to the shared state. Each command touches exactly one field.
    pub fn apply(self, shared: &SharedState) {
        debug!("applying {:?}", self);
        match self {
            Self::SetMoistureSetpoint(v) => shared.config.set_moisture_setpoint(v),
            Self::SetTemperatureSetpoint(v) => shared.config.set_temperature_setpoint(v),
            Self::SetLightThreshold(v) => shared.config.set_light_threshold(v),
            Self::SetPhotoperiod(on) => shared.config.set_photoperiod_enabled(on),
            Self::SetDailyLightGoal(secs) => shared.config.set_daily_light_goal_secs(secs),
            Self::ResetLightTimer => shared.reset_light_seconds(),
        }
    }

    /// Render the canonical wire line, newline included.
    pub fn encode(&self) -> heapless::String<ENCODED_MAX> {
        use core::fmt::Write;

        let mut out = heapless::String::new();
        // Longest rendering is `SET,META_LUZ,4294967295\n`, well under capacity.
        let _ = writeln!(out, "{self}");
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetMoistureSetpoint(v) => write!(f, "SET,HUMID,{v}"),
            Self::SetTemperatureSetpoint(v) => write!(f, "SET,TEMP,{v}"),
            Self::SetLightThreshold(v) => write!(f, "SET,LDR,{v}"),
            Self::SetPhotoperiod(on) => write!(f, "SET,FOTO,{}", u8::from(*on)),
            Self::SetDailyLightGoal(v) => write!(f, "SET,META_LUZ,{v}"),
            Self::ResetLightTimer => f.write_str("RESET,TIMER_LUZ"),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn after_last_comma(line: &[u8]) -> &[u8] {
    match line.iter().rposition(|&b| b == b',') {
        Some(i) => &line[i + 1..],
        None => line,
    }
}

/// C-style `atoi` that never fails: 0 when no digits, saturating at
/// `i32::MAX` / `i32::MIN` on overflow like a 32-bit `strtol`.
fn lenient_atoi(text: &[u8]) -> i32 {
    let mut rest = text;
    while let [b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C, tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    // Accumulate toward the sign so i32::MIN is reachable.
    let mut value = 0i32;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i32::from(b - b'0');
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => value = v,
            None => return if negative { i32::MIN } else { i32::MAX },
        }
    }
    value
}
