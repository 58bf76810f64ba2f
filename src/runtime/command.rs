use std::path::PathBuf;

/// A parsed console command. Track numbers are 1-based on the console and
/// stored 0-based here.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Select(usize),
    Delete(usize),
    Clear,
    Next,
    Prev,
    Toggle,
    Play,
    Pause,
    Stop,
    Seek(i64),
    Forward,
    Rewind,
    Volume(i32),
    EqShow,
    EqSet { freq_hz: f64, gain_db: f64 },
    EqQ { freq_hz: f64, q: f64 },
    EqReset,
    List,
    Status,
    Config,
    Help,
    Quit,
    Empty,
}

/// Split a line on whitespace; double quotes group words.
fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut cur));
                    has_token = false;
                }
            }
            c => {
                cur.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        args.push(cur);
    }
    Ok(args)
}

fn track_number(arg: Option<&String>) -> Result<usize, String> {
    let arg = arg.ok_or("missing track number")?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("not a track number: {arg}")),
    }
}

/// Milliseconds, or `m:ss`.
fn parse_position(arg: &str) -> Option<i64> {
    match arg.split_once(':') {
        Some((m, s)) => {
            let m: i64 = m.parse().ok()?;
            let s: i64 = s.parse().ok()?;
            if m < 0 || !(0..60).contains(&s) {
                return None;
            }
            m.checked_mul(60)
                .and_then(|v| v.checked_add(s))
                .and_then(|v| v.checked_mul(1000))
        }
        None => arg.parse().ok(),
    }
}

fn number<T: std::str::FromStr>(arg: Option<&String>, what: &str) -> Result<T, String> {
    let arg = arg.ok_or_else(|| format!("missing {what}"))?;
    arg.parse().map_err(|_| format!("not a valid {what}: {arg}"))
}

pub fn parse(line: &str) -> Result<Command, String> {
    let args = split_args(line)?;
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Empty);
    };

    let cmd = match name.to_ascii_lowercase().as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                return Err("add: give at least one file or directory".to_string());
            }
            Command::Add(rest.iter().map(PathBuf::from).collect())
        }
        "select" | "s" => Command::Select(track_number(rest.first())?),
        "delete" | "del" | "rm" => Command::Delete(track_number(rest.first())?),
        "clear" => Command::Clear,
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "toggle" | "t" => Command::Toggle,
        "play" => Command::Play,
        "pause" => Command::Pause,
        "stop" => Command::Stop,
        "seek" => {
            let arg = rest.first().ok_or("seek: missing position")?;
            let ms = parse_position(arg).ok_or_else(|| format!("seek: bad position: {arg}"))?;
            Command::Seek(ms)
        }
        "ff" => Command::Forward,
        "rew" => Command::Rewind,
        "volume" | "vol" => Command::Volume(number(rest.first(), "volume")?),
        "eq" => match rest {
            [] => Command::EqShow,
            [r] if r.eq_ignore_ascii_case("reset") => Command::EqReset,
            [kw, freq, q] if kw.eq_ignore_ascii_case("q") => Command::EqQ {
                freq_hz: number(Some(freq), "frequency")?,
                q: number(Some(q), "q")?,
            },
            [freq, gain] => Command::EqSet {
                freq_hz: number(Some(freq), "frequency")?,
                gain_db: number(Some(gain), "gain")?,
            },
            _ => {
                return Err("usage: eq | eq reset | eq <freq> <dB> | eq q <freq> <q>".to_string());
            }
        },
        "list" | "ls" => Command::List,
        "status" => Command::Status,
        "config" => Command::Config,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(cmd)
}
