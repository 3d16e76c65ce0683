//! Bracket matching strategies.
//!
//! [`LinearScan`] walks the program to find the partner bracket every time a
//! jump is taken. [`JumpTable`] does that walk once, up front. Both return
//! the index of the matching bracket; the engine lands there and then steps
//! past it as usual.

/// How an engine finds the partner of a bracket.
pub trait JumpResolver: Sized {
    /// Prepare for `program` (cleaned bytes).
    fn prepare(program: &[u8]) -> Self;

    /// Index of the `]` matching the `[` at `open`.
    fn forward(&self, program: &[u8], open: usize) -> Option<usize>;

    /// Index of the `[` matching the `]` at `close`.
    fn backward(&self, program: &[u8], close: usize) -> Option<usize>;
}

/// Re-scan the program on every taken jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl JumpResolver for LinearScan {
    fn prepare(_program: &[u8]) -> Self {
        LinearScan
    }

    fn forward(&self, program: &[u8], open: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut ip = open;

        while depth > 0 {
            ip += 1;
            match program.get(ip)? {
                b'[' => depth += 1,
                b']' => depth -= 1,
                _ => {}
            }
        }
        Some(ip)
    }

    fn backward(&self, program: &[u8], close: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut ip = close;

        while depth > 0 {
            ip = ip.checked_sub(1)?;
            match program[ip] {
                b'[' => depth -= 1,
                b']' => depth += 1,
                _ => {}
            }
        }
        Some(ip)
    }
}

/// Partner index for every bracket, computed once.
#[derive(Debug, Clone, Default)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
}

impl JumpTable {
    /// Partner of the bracket at `ip`, if any.
    pub fn target(&self, ip: usize) -> Option<usize> {
        self.targets.get(ip).copied().flatten()
    }
}

impl JumpResolver for JumpTable {
    fn prepare(program: &[u8]) -> Self {
        let mut targets = vec![None; program.len()];
        let mut open = Vec::new();

        for (ip, &b) in program.iter().enumerate() {
            match b {
                b'[' => open.push(ip),
                b']' => {
                    if let Some(start) = open.pop() {
                        targets[start] = Some(ip);
                        targets[ip] = Some(start);
                    }
                }
                _ => {}
            }
        }

        Self { targets }
    }

    fn forward(&self, _program: &[u8], open: usize) -> Option<usize> {
        self.target(open)
    }

    fn backward(&self, _program: &[u8], close: usize) -> Option<usize> {
        self.target(close)
    }
}
