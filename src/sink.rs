//! Where progress and dry-run lines go

/// Receives one line of user-facing output at a time
pub trait Sink {
    fn line(&mut self, line: &str);
}

/// Print each line to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Sink for Stdout {
    fn line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Collect lines in memory
impl Sink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn line(&mut self, line: &str) {
        (**self).line(line)
    }
}
