use crate::ast::Param;

/// Lowers the AST into [`IrProgram`]s.
pub mod generator;

pub use generator::IrGenerator;

/// An operand or result of an IR instruction.
///
/// The textual form (`Display`) is the instruction stream's only
/// addressing mode: the interpreter keys its value slots by it. Temps
/// render as `t0, t1, …`, locals as `l_name`, globals as `g_name`;
/// constants and labels render as their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrValue {
    /// A compiler-generated temporary with a per-function id.
    Temp(usize),
    /// A named function-local slot (variables and parameters).
    Local(String),
    /// A named global slot.
    Global(String),
    /// A literal's source text, resolved when read.
    Constant(String),
    /// A label name used as a value.
    Label(String),
}

impl std::fmt::Display for IrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temp(id) => write!(f, "t{id}"),
            Self::Local(name) => write!(f, "l_{name}"),
            Self::Global(name) => write!(f, "g_{name}"),
            Self::Constant(text) => write!(f, "{text}"),
            Self::Label(name) => write!(f, "{name}"),
        }
    }
}

/// The instruction set of the linear IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Integer division; raises on a zero divisor.
    Div,
    /// Integer remainder; raises on a zero divisor.
    Mod,
    /// Integer negation of one operand.
    Neg,
    /// Formats both operands as text and concatenates them.
    Concat,
    /// Integer logical and.
    And,
    /// Integer logical or.
    Or,
    /// Integer logical not of one operand.
    Not,
    /// Equality comparison, result 0 or 1.
    Eq,
    /// Inequality comparison.
    Ne,
    /// Less-than comparison.
    Lt,
    /// Greater-than comparison.
    Gt,
    /// Less-or-equal comparison.
    Le,
    /// Greater-or-equal comparison.
    Ge,
    /// Unconditional jump to the instruction's label.
    Jmp,
    /// Jump when the operand is zero.
    Jz,
    /// Jump when the operand is non-zero.
    Jnz,
    /// Call the function named by the instruction's label.
    Call,
    /// Return from the current function.
    Ret,
    /// Indexed read (`array[index]`).
    Load,
    /// Copy the operand into the result slot.
    Store,
    /// Read a global slot.
    LoadGlobal,
    /// Write a global slot.
    StoreGlobal,
    /// Load an integer literal.
    LoadInt,
    /// Load a floating-point literal.
    LoadFloat,
    /// Load a string literal.
    LoadString,
    /// Write the operand to the console and flush.
    Print,
    /// Read one line from the console, showing the prompt first.
    Input,
    /// Read one key in cbreak mode.
    KeyPressed,
    /// Open the graphics window: `(width, height, title)`.
    Screen,
    /// `drawPixel(x, y, r, g, b)`.
    DrawPixel,
    /// `drawRect(x, y, w, h, r, g, b, filled)`.
    DrawRect,
    /// `drawLine(x1, y1, x2, y2, r, g, b)`.
    DrawLine,
    /// `drawCircle(x, y, radius, r, g, b, filled)`.
    DrawCircle,
    /// `clearScreen(r, g, b)`.
    ClearScreen,
    /// Poll events and flush the frame.
    Present,
    /// A jump target; executes as a no-op.
    Label,
    /// Does nothing.
    Nop,
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Neg => "NEG",
            Self::Concat => "CONCAT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Jnz => "JNZ",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::LoadGlobal => "LOAD_GLOBAL",
            Self::StoreGlobal => "STORE_GLOBAL",
            Self::LoadInt => "LOAD_INT",
            Self::LoadFloat => "LOAD_FLOAT",
            Self::LoadString => "LOAD_STRING",
            Self::Print => "PRINT",
            Self::Input => "INPUT",
            Self::KeyPressed => "KEY_PRESSED",
            Self::Screen => "SCREEN",
            Self::DrawPixel => "DRAW_PIXEL",
            Self::DrawRect => "DRAW_RECT",
            Self::DrawLine => "DRAW_LINE",
            Self::DrawCircle => "DRAW_CIRCLE",
            Self::ClearScreen => "CLEAR_SCREEN",
            Self::Present => "PRESENT",
            Self::Label => "LABEL",
            Self::Nop => "NOP",
        };
        write!(f, "{name}")
    }
}

/// One IR instruction.
///
/// `label` names a jump target for `Jmp`/`Jz`/`Jnz`, the jump target
/// being defined for `Label`, or the callee for `Call`. `prompt` carries
/// the literal prompt text of an `Input` instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct IrInstruction {
    /// The operation.
    pub opcode: Opcode,
    /// Operands in source order.
    pub operands: Vec<IrValue>,
    /// Where the produced value is stored, when the opcode produces one.
    pub result: Option<IrValue>,
    /// Jump target, label definition, or callee name.
    pub label: Option<String>,
    /// Literal prompt text for `Input`.
    pub prompt: Option<String>,
}

impl IrInstruction {
    /// Builds an instruction with no operands, result, label, or prompt.
    #[must_use]
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
            result: None,
            label: None,
            prompt: None,
        }
    }
}

impl std::fmt::Display for IrInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.opcode == Opcode::Label {
            return write!(f, "LABEL {}:", self.label.as_deref().unwrap_or(""));
        }

        write!(f, "{}", self.opcode)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {operand}")?;
            } else {
                write!(f, ", {operand}")?;
            }
        }
        if matches!(self.opcode, Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Call) {
            if let Some(label) = &self.label {
                if self.operands.is_empty() {
                    write!(f, " {label}")?;
                } else {
                    write!(f, ", {label}")?;
                }
            }
        }
        if let Some(result) = &self.result {
            write!(f, " -> {result}")?;
        }
        Ok(())
    }
}

/// The lowered form of one function.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    /// The function name.
    pub name: String,
    /// The textual return type.
    pub return_type: String,
    /// The declared parameters.
    pub params: Vec<Param>,
    /// The instruction list, executed top to bottom.
    pub instructions: Vec<IrInstruction>,
}

/// A lowered program: one [`IrFunction`] per declared function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrProgram {
    /// Functions in declaration order.
    pub functions: Vec<IrFunction>,
}
