//! Line-oriented builder for brace-style C# source.

/// One level of indentation in generated scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Unity's default editor setting.
    pub const CSHARP: Self = Self::Spaces(4);

    fn push_to(self, buffer: &mut String, depth: usize) {
        match self {
            Self::Spaces(width) => {
                buffer.extend(std::iter::repeat_n(' ', depth * width as usize));
            }
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', depth)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}

/// Builds source text line by line, tracking brace depth.
///
/// ```
/// use scenebind_codegen::CodeBuilder;
///
/// let code = CodeBuilder::csharp()
///     .block("class Foo", |b| b.line("int bar;"))
///     .finish();
///
/// assert_eq!(code, "class Foo\n{\n    int bar;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent: Indent,
    depth: usize,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            depth: 0,
            out: String::new(),
        }
    }

    pub fn csharp() -> Self {
        Self::new(Indent::CSHARP)
    }

    pub fn line(mut self, text: &str) -> Self {
        self.indent.push_to(&mut self.out, self.depth);
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    /// Empty line, never indented.
    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    /// `header`, then the body between braces on their own lines.
    pub fn block(self, header: &str, body: impl FnOnce(Self) -> Self) -> Self {
        let mut inner = self.line(header).line("{");
        inner.depth += 1;
        let mut done = body(inner);
        done.depth = done.depth.saturating_sub(1);
        done.line("}")
    }

    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    /// Apply `f` once per item, in iteration order.
    pub fn each<I: IntoIterator>(self, items: I, f: impl Fn(Self, I::Item) -> Self) -> Self {
        items.into_iter().fold(self, f)
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::csharp()
    }
}
