use crate::{script, Error, Opt};
use shaper::{Outcome, Session, State};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Line-based driver of a shaping session.
///
/// Lines are read from an input, executed in the session,
/// and their outcomes are written to `out`.
pub struct Shell<W> {
    session: Session,
    out: W,
    quiet: bool,
    echo: bool,
    /// canonical paths of the scripts currently being loaded
    loading: Vec<PathBuf>,
}

impl<W: Write> Shell<W> {
    pub fn new(opt: &Opt, out: W) -> Self {
        let mut session = Session::new();
        session.latex = opt.latex;
        Self {
            session,
            out,
            quiet: opt.quiet,
            echo: opt.echo,
            loading: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn quit(&self) -> bool {
        self.session.quit
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        match self.session.state() {
            State::Shaping => write!(self.out, "> ")?,
            State::Idle => {
                writeln!(self.out, "known rules:")?;
                for (name, rule) in self.session.rules() {
                    writeln!(self.out, "\t'{}': {}", name, rule)?;
                }
                write!(self.out, "shaper> ")?;
            }
        }
        self.out.flush()
    }

    /// Execute a line and print its outcome.
    pub fn line(&mut self, line: &str) -> Result<(), Error> {
        if self.echo {
            writeln!(self.out, "{}", line.trim_end())?;
        }
        let outcome = self.session.execute(line)?;
        self.report(outcome)
    }

    fn report(&mut self, outcome: Outcome) -> Result<(), Error> {
        let session = &self.session;
        match outcome {
            Outcome::Nothing | Outcome::Defined(_) | Outcome::Quit => (),
            Outcome::Shaping(tm) => writeln!(self.out, "Shaping {}", session.show(&tm))?,
            Outcome::Rewritten(tm) => writeln!(self.out, "{}", session.show(&tm))?,
            Outcome::Finished(tm) => {
                writeln!(self.out, "Finished shaping expression {}", session.show(&tm))?
            }
            Outcome::Notation(true) => writeln!(self.out, "switched to latex output")?,
            Outcome::Notation(false) => writeln!(self.out, "switched to normal output")?,
            Outcome::Load(path) => self.load(Path::new(&path))?,
        }
        Ok(())
    }

    /// Run all lines of a script in the session.
    ///
    /// Every line runs independently: a failing line is reported
    /// together with its position, and the script continues.
    /// Only failing to open or to read the script stops it.
    pub fn load(&mut self, path: &Path) -> Result<(), Error> {
        let read = script::open(path)?;
        let canonical = path.canonicalize()?;
        if self.loading.contains(&canonical) {
            return Err(Error::Recursive(path.to_path_buf()));
        }
        writeln!(self.out, "processing {}", path.display())?;
        log::info!("Load script {}", path.display());

        self.loading.push(canonical);
        let result = self.run_script(path, read);
        self.loading.pop();
        result
    }

    fn run_script(&mut self, path: &Path, read: impl BufRead) -> Result<(), Error> {
        for (i, line) in read.lines().enumerate() {
            let line = line?;
            if let Err(error) = self.line(&line) {
                let error = Error::Script {
                    path: path.to_path_buf(),
                    line: i + 1,
                    error: Box::new(error),
                };
                log::debug!("{:?}", error);
                writeln!(self.out, "=> {}", error)?;
            }
            if self.session.quit {
                break;
            }
        }
        Ok(())
    }

    /// Read and execute lines until the input ends or the user quits.
    ///
    /// Failing lines are reported and do not stop the loop.
    pub fn repl(&mut self, mut input: impl BufRead) -> Result<(), Error> {
        writeln!(self.out, "Use 'quit' to exit")?;
        let mut line = String::new();
        while !self.session.quit {
            self.prompt()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if let Err(e) = self.line(&line) {
                log::debug!("{:?}", e);
                writeln!(self.out, "=> {}", e)?;
            }
        }
        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }
}

#[cfg(test)]
fn shell(args: &[&str]) -> Shell<Vec<u8>> {
    use clap::Parser;
    let args = std::iter::once("shaperepl").chain(args.iter().copied());
    Shell::new(&Opt::parse_from(args), Vec::new())
}

#[cfg(test)]
fn output(shell: &Shell<Vec<u8>>) -> &str {
    std::str::from_utf8(&shell.out).unwrap()
}

#[cfg(test)]
fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos").join(name)
}

#[cfg(test)]
fn temp_script(name: &str, content: impl FnOnce(&Path) -> String) -> PathBuf {
    let name = format!("shaperepl-{}-{}.shp", std::process::id(), name);
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, content(&path)).unwrap();
    path
}

#[test]
fn swap() -> Result<(), Error> {
    let mut sh = shell(&["--quiet"]);
    let input = "rule swap: pair(A, B) = pair(B, A)
shape pair(f(x), g(y))
apply swap
apply !swap
done
quit
shape z
";
    sh.repl(input.as_bytes())?;
    let expected = "Use 'quit' to exit
Shaping pair(f(x), g(y))
pair(g(y), f(x))
pair(f(x), g(y))
Finished shaping expression pair(f(x), g(y))
Goodbye!
";
    assert_eq!(output(&sh), expected);
    assert!(sh.quit());
    assert_eq!(sh.session().state(), State::Idle);
    Ok(())
}

#[test]
fn prompt() -> Result<(), Error> {
    let mut sh = shell(&[]);
    sh.repl("rule swap: pair(A, B) = pair(B, A)\nshape x\n".as_bytes())?;
    let expected = "Use 'quit' to exit
known rules:
shaper> known rules:
\t'swap': pair(A, B) = pair(B, A)
shaper> Shaping x
> Goodbye!
";
    assert_eq!(output(&sh), expected);
    Ok(())
}

#[test]
fn errors() -> Result<(), Error> {
    let mut sh = shell(&["--quiet"]);
    let input = "done\nshape f(\nload \"notes.txt\"\nshape x\nshape y\n";
    sh.repl(input.as_bytes())?;
    let expected = "Use 'quit' to exit
=> no shaping in place
=> parse error: unexpected end of input
=> notes.txt is not a script file
Shaping x
=> already shaping
Goodbye!
";
    assert_eq!(output(&sh), expected);
    Ok(())
}

#[test]
fn notation() -> Result<(), Error> {
    let mut sh = shell(&["--latex", "--quiet", "--echo"]);
    for line in ["shape eq(x, y)", "latex", "done"] {
        sh.line(line)?;
    }
    let expected = "shape eq(x, y)
Shaping x = y
latex
switched to normal output
done
Finished shaping expression eq(x, y)
";
    assert_eq!(output(&sh), expected);
    Ok(())
}

#[test]
fn demo_swap() -> Result<(), Error> {
    let path = demo("swap.shp");
    let mut sh = shell(&["--quiet"]);
    sh.load(&path)?;
    let expected = format!(
        "processing {}
Shaping pair(f(x), g(y))
pair(g(y), f(x))
pair(f(x), g(y))
Finished shaping expression pair(f(x), g(y))
",
        path.display()
    );
    assert_eq!(output(&sh), expected);
    assert_eq!(sh.session().rules().count(), 1);
    assert_eq!(sh.session().state(), State::Idle);
    Ok(())
}

#[test]
fn demo_calculus() -> Result<(), Error> {
    let mut sh = shell(&["--quiet"]);
    sh.load(&demo("calculus.shp"))?;
    let lines: Vec<_> = output(&sh).lines().skip(1).collect();
    let last = r"Finished shaping expression \left(\lim\limits_{n\to inf}\left(one\right) + \lim\limits_{n\to inf}\left(\frac{one}{n}\right)\right)";
    assert_eq!(
        lines,
        [
            "Shaping lim(to(n, inf), div(sum(n, one), n))",
            "lim(to(n, inf), sum(div(n, n), div(one, n)))",
            "lim(to(n, inf), sum(one, div(one, n)))",
            "switched to latex output",
            r"\left(\lim\limits_{n\to inf}\left(one\right) + \lim\limits_{n\to inf}\left(\frac{one}{n}\right)\right)",
            last,
        ]
    );
    assert!(sh.session().latex);
    Ok(())
}

#[test]
fn script_error() -> Result<(), Error> {
    let content = "shape f(a)\nshape g(b)\nrule r: f(X) = X\nshape (\napply r\n";
    let path = temp_script("error", |_| content.into());
    let mut sh = shell(&["--quiet"]);
    sh.load(&path)?;
    let p = path.display();
    let expected = format!(
        "processing {p}
Shaping f(a)
=> {p}:2: already shaping
=> {p}:4: parse error: expected term
a
"
    );
    assert_eq!(output(&sh), expected);
    // lines after the failing ones were run
    assert!(sh.session().rule("r").is_some());
    assert_eq!(sh.session().current().map(|tm| tm.to_string()), Some("a".into()));
    std::fs::remove_file(path).unwrap();
    Ok(())
}

#[test]
fn recursive() -> Result<(), Error> {
    let path = temp_script("rec", |path| format!("load \"{}\"\nshape x\n", path.display()));
    let mut sh = shell(&["--quiet"]);
    sh.load(&path)?;
    let p = path.display();
    let expected = format!(
        "processing {p}
=> {p}:1: {p} is already being loaded
Shaping x
"
    );
    assert_eq!(output(&sh), expected);
    assert!(sh.loading.is_empty());
    std::fs::remove_file(path).unwrap();
    Ok(())
}
