//! Minimal TAP (Test Anything Protocol) emitter for the conformance
//! runner. Test lines stream as results arrive; the plan line is printed
//! at the end, which TAP permits.

pub struct Tap {
    count: usize,
    failures: usize,
}

impl Tap {
    pub fn new() -> Self {
        Tap {
            count: 0,
            failures: 0,
        }
    }

    pub fn ok(&mut self, name: impl AsRef<str>) {
        self.count += 1;
        println!("ok {} - {}", self.count, name.as_ref());
    }

    pub fn not_ok(&mut self, name: impl AsRef<str>, detail: impl AsRef<str>) {
        self.count += 1;
        self.failures += 1;
        println!("not ok {} - {}", self.count, name.as_ref());
        for line in detail.as_ref().lines() {
            println!("# {}", line);
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }

    pub fn finish(&self) {
        println!("1..{}", self.count);
        if self.failures == 0 {
            println!("# {} test(s) passed", self.count);
        } else {
            println!("# {} of {} test(s) failed", self.failures, self.count);
        }
    }
}
