/// Single-line text field with a prompt, e.g. `name: Ali`.
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    prompt: &'static str,
    buffer: String,
}

impl TextInput {
    /// Start a fresh entry behind `prompt`.
    pub fn begin(&mut self, prompt: &'static str) {
        self.prompt = prompt;
        self.buffer.clear();
    }

    pub fn insert(&mut self, c: char) {
        if !c.is_control() {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Take the entered text, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.prompt = "";
        std::mem::take(&mut self.buffer)
    }

    pub fn clear(&mut self) {
        self.prompt = "";
        self.buffer.clear();
    }

    /// Prompt followed by the text typed so far.
    pub fn display(&self) -> String {
        format!("{}{}", self.prompt, self.buffer)
    }
}
