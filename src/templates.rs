//! Built-in starter templates and the default document source.
//!
//! The catalog is a fixed, ordered, read-only slice; adding a template is a
//! source change, never a runtime mutation.

/// An immutable starter snippet the user can load into the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

/// Source loaded on startup and restored by the Reset action.
pub const DEFAULT_SOURCE: &str = r#"// LESS Playground
@primary: #6366f1;
@secondary: #8b5cf6;
@accent: #06b6d4;

@font-primary: 'Inter', sans-serif;
@radius-md: 8px;
@radius-lg: 12px;
@spacing-sm: 0.5rem;
@spacing-md: 1rem;
@spacing-lg: 1.5rem;
@spacing-xl: 2rem;

.gradient(@start, @end) {
  background: linear-gradient(to right, @start, @end);
}

.button-variant(@bg, @text: white) {
  background: @bg;
  color: @text;
  padding: @spacing-sm @spacing-md;
  border-radius: @radius-md;
  border: none;
  font-family: @font-primary;
  cursor: pointer;
}

.hero-section {
  .gradient(@primary, @secondary);
  padding: @spacing-xl;
  text-align: center;
  color: white;

  h1 {
    font-size: 3.5rem;
    margin-bottom: @spacing-md;
  }
}

.dashboard {
  display: grid;
  gap: @spacing-lg;
  padding: @spacing-xl;

  .widget {
    background: white;
    border-radius: @radius-lg;
    padding: @spacing-lg;

    &.highlight {
      border-left: 4px solid @accent;
    }
  }
}

.btn-primary {
  .button-variant(@primary);
}

.btn-secondary {
  .button-variant(@secondary);
}

.btn-glass {
  background: rgba(255, 255, 255, 0.1);
  color: @primary;
  border: 1px solid rgba(255, 255, 255, 0.2);
  border-radius: @radius-md;
  padding: @spacing-sm @spacing-md;
}

@media (max-width: 768px) {
  .hero-section {
    padding: @spacing-lg @spacing-md;

    h1 {
      font-size: 2.5rem;
    }
  }
}
"#;

/// Ordered template catalog shown on the Templates tab.
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "Modern Dashboard",
        description: "Clean dashboard with cards and gradients",
        source: r#"@primary: #3b82f6;
@secondary: #1e40af;

.dashboard {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
  gap: 1rem;
  padding: 2rem;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  min-height: 100vh;
}

.card {
  background: white;
  border-radius: 12px;
  padding: 1.5rem;
  box-shadow: 0 10px 25px rgba(0,0,0,0.1);
  transition: transform 0.3s ease;

  &:hover {
    transform: translateY(-5px);
  }
}"#,
    },
    Template {
        name: "Glassmorphism",
        description: "Modern glass effect design",
        source: r#"@glass-bg: rgba(255, 255, 255, 0.1);
@glass-border: rgba(255, 255, 255, 0.2);

.glass-card {
  background: @glass-bg;
  backdrop-filter: blur(10px);
  border: 1px solid @glass-border;
  border-radius: 16px;
  padding: 2rem;
  box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1);
}"#,
    },
    Template {
        name: "Neon Buttons",
        description: "Cyberpunk-style glowing buttons",
        source: r#"@neon-blue: #00f5ff;
@neon-pink: #ff006e;

.neon-button {
  background: transparent;
  border: 2px solid @neon-blue;
  color: @neon-blue;
  padding: 1rem 2rem;
  border-radius: 8px;
  text-transform: uppercase;
  letter-spacing: 2px;
  transition: all 0.3s ease;

  &:hover {
    box-shadow: 0 0 20px @neon-blue;
    text-shadow: 0 0 10px @neon-blue;
  }
}"#,
    },
];

/// Look a template up by its display name.
pub fn find(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}
