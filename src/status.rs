use log::debug;

/// ステータス欄に表示する物語テキストのバッファ。
///
/// フロントエンドは全行を表示するため、`flush_debug` でログ出力しても行は消さない。
/// ログ出力済みの位置だけを覚えておく。
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    lines: Vec<String>,
    flushed: usize,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<T: ToString>(&mut self, line: T) {
        self.lines.push(line.to_string());
    }

    /// 既存の行を破棄して 1 行だけにする。
    pub fn replace<T: ToString>(&mut self, line: T) {
        self.lines.clear();
        self.flushed = 0;
        self.append(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    // 未出力の行をまとめて debug 出力
    pub fn flush_debug(&mut self) {
        if self.flushed < self.lines.len() {
            debug!("\n{}", self.lines[self.flushed..].join("\n"));
            self.flushed = self.lines.len();
        }
    }
}
