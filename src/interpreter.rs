use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use crate::{
    error::RuntimeError,
    graphics::{Canvas, CanvasFactory, KeyId},
    ir::{IrFunction, IrInstruction, IrProgram, IrValue, Opcode},
    term,
};

/// The tagged runtime value and its coercions.
pub mod value;

pub use value::Value;

/// Executes the IR of the function named `main`.
///
/// State is a single flat map from the textual form of an [`IrValue`]
/// (`t3`, `l_x`, …) to a [`Value`], plus a label index built by one
/// prescan of the instruction list. Other functions' bodies are inert:
/// calls to them store integer 0 and continue.
///
/// The graphics window is constructed through the injected factory when a
/// `SCREEN` instruction executes and torn down on `quit()` or when the
/// user closes the window. Program output goes to the injected writer and
/// is flushed after every `PRINT`.
pub struct Interpreter<W> {
    slots: HashMap<String, Value>,
    canvas: Option<Box<dyn Canvas>>,
    factory: Box<dyn CanvasFactory>,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter drawing through `factory` and printing to
    /// `out`.
    pub fn new(factory: Box<dyn CanvasFactory>, out: W) -> Self {
        Self {
            slots: HashMap::new(),
            canvas: None,
            factory,
            out,
        }
    }

    /// Runs the program's `main` function to completion.
    ///
    /// A program without `main` does nothing. Execution ends when the
    /// instruction pointer falls off the end, at a `RET`, on `quit()`, or
    /// when the window closes.
    ///
    /// # Errors
    /// Returns the fatal [`RuntimeError`] that aborted execution, if any.
    pub fn run(&mut self, program: &IrProgram) -> Result<(), RuntimeError> {
        let Some(main) = program.functions.iter().find(|func| func.name == "main") else {
            return Ok(());
        };
        self.execute(main)
    }

    fn execute(&mut self, func: &IrFunction) -> Result<(), RuntimeError> {
        let labels = scan_labels(func);
        let instructions = &func.instructions;
        let mut ip = 0;

        while ip < instructions.len() {
            let instr = &instructions[ip];
            match instr.opcode {
                Opcode::LoadInt => {
                    let text = constant_text(instr);
                    let value = text
                        .trim()
                        .parse()
                        .map_err(|_| RuntimeError::InvalidNumber { text: text.to_string() })?;
                    self.set(instr, Value::Integer(value));
                }

                Opcode::LoadFloat => {
                    let text = constant_text(instr);
                    let value = text
                        .trim()
                        .parse()
                        .map_err(|_| RuntimeError::InvalidNumber { text: text.to_string() })?;
                    self.set(instr, Value::Float(value));
                }

                Opcode::LoadString => {
                    self.set(instr, Value::Str(constant_text(instr).to_string()));
                }

                Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod => {
                    let a = self.operand(instr, 0).to_int()?;
                    let b = self.operand(instr, 1).to_int()?;
                    let value = match instr.opcode {
                        Opcode::Add => a.wrapping_add(b),
                        Opcode::Sub => a.wrapping_sub(b),
                        Opcode::Mul => a.wrapping_mul(b),
                        Opcode::Div | Opcode::Mod => {
                            if b == 0 {
                                return Err(RuntimeError::DivisionByZero);
                            }
                            if instr.opcode == Opcode::Div {
                                a.wrapping_div(b)
                            } else {
                                a.wrapping_rem(b)
                            }
                        }
                        _ => unreachable!("arithmetic opcode"),
                    };
                    self.set(instr, Value::Integer(value));
                }

                Opcode::Neg => {
                    let value = self.operand(instr, 0).to_int()?;
                    self.set(instr, Value::Integer(value.wrapping_neg()));
                }

                Opcode::Not => {
                    let value = self.operand(instr, 0).to_int()?;
                    self.set(instr, Value::Integer(i64::from(value == 0)));
                }

                Opcode::And => {
                    let a = self.operand(instr, 0).to_int()?;
                    let b = self.operand(instr, 1).to_int()?;
                    self.set(instr, Value::Integer(i64::from(a != 0 && b != 0)));
                }

                Opcode::Or => {
                    let a = self.operand(instr, 0).to_int()?;
                    let b = self.operand(instr, 1).to_int()?;
                    self.set(instr, Value::Integer(i64::from(a != 0 || b != 0)));
                }

                Opcode::Concat => {
                    let a = self.operand(instr, 0);
                    let b = self.operand(instr, 1);
                    self.set(instr, Value::Str(format!("{a}{b}")));
                }

                Opcode::Eq | Opcode::Ne | Opcode::Lt | Opcode::Gt | Opcode::Le | Opcode::Ge => {
                    let a = self.operand(instr, 0);
                    let b = self.operand(instr, 1);
                    let truth = compare(instr.opcode, &a, &b)?;
                    self.set(instr, Value::Integer(i64::from(truth)));
                }

                Opcode::Jz => {
                    let cond = self.operand(instr, 0).to_int()?;
                    if cond == 0 {
                        ip = jump_target(&labels, instr)?;
                        continue;
                    }
                }

                Opcode::Jnz => {
                    let cond = self.operand(instr, 0).to_int()?;
                    if cond != 0 {
                        ip = jump_target(&labels, instr)?;
                        continue;
                    }
                }

                Opcode::Jmp => {
                    ip = jump_target(&labels, instr)?;
                    continue;
                }

                Opcode::Store => {
                    let value = self.operand(instr, 0);
                    self.set(instr, value);
                }

                Opcode::Print => {
                    let value = self.operand(instr, 0);
                    write!(self.out, "{value}")?;
                    self.out.flush()?;
                }

                Opcode::Input => {
                    if let Some(prompt) = instr.prompt.as_deref() {
                        if !prompt.is_empty() {
                            write!(self.out, "{prompt}")?;
                            self.out.flush()?;
                        }
                    }
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    while line.ends_with('\n') || line.ends_with('\r') {
                        line.pop();
                    }
                    self.set(instr, Value::Str(line));
                }

                Opcode::KeyPressed => {
                    let key = term::read_single_key()?;
                    self.set(instr, Value::Str(key.to_string()));
                }

                Opcode::Screen => self.exec_screen(instr),

                Opcode::ClearScreen => {
                    if let Some(args) = self.canvas_args(instr, 3) {
                        if let Some(canvas) = self.canvas.as_mut() {
                            canvas.clear(args[0], args[1], args[2]);
                        }
                        self.set(instr, Value::Integer(1));
                    }
                }

                Opcode::DrawPixel => {
                    if let Some(args) = self.canvas_args(instr, 5) {
                        if let Some(canvas) = self.canvas.as_mut() {
                            canvas.draw_pixel(args[0], args[1], args[2], args[3], args[4]);
                        }
                        self.set(instr, Value::Integer(1));
                    }
                }

                Opcode::DrawRect => {
                    if let Some(args) = self.canvas_args(instr, 8) {
                        if let Some(canvas) = self.canvas.as_mut() {
                            canvas.draw_rect(
                                args[0], args[1], args[2], args[3], args[4], args[5], args[6],
                                args[7],
                            );
                        }
                        self.set(instr, Value::Integer(1));
                    }
                }

                Opcode::DrawLine => {
                    if let Some(args) = self.canvas_args(instr, 7) {
                        if let Some(canvas) = self.canvas.as_mut() {
                            canvas.draw_line(
                                args[0], args[1], args[2], args[3], args[4], args[5], args[6],
                            );
                        }
                        self.set(instr, Value::Integer(1));
                    }
                }

                Opcode::DrawCircle => {
                    if let Some(args) = self.canvas_args(instr, 7) {
                        if let Some(canvas) = self.canvas.as_mut() {
                            canvas.draw_circle(
                                args[0], args[1], args[2], args[3], args[4], args[5], args[6],
                            );
                        }
                        self.set(instr, Value::Integer(1));
                    }
                }

                Opcode::Present => {
                    if let Some(canvas) = self.canvas.as_mut() {
                        canvas.handle_events();
                        canvas.present();
                        if canvas.should_close() {
                            self.canvas = None;
                            break;
                        }
                    }
                    self.set(instr, Value::Integer(1));
                }

                Opcode::Call => {
                    if self.exec_call(instr) {
                        return Ok(());
                    }
                }

                // Index reads have no backing storage; arrays exist only
                // as surface syntax.
                Opcode::Load => {}

                Opcode::LoadGlobal | Opcode::StoreGlobal => {}

                Opcode::Label | Opcode::Nop => {}

                Opcode::Ret => break,
            }

            ip += 1;
        }

        Ok(())
    }

    /// Executes `SCREEN`: tears down any previous window, then opens a
    /// new one from the `(width, height, title)` operands.
    fn exec_screen(&mut self, instr: &IrInstruction) {
        if instr.operands.len() >= 3 {
            let width = self.operand(instr, 0).coerce_int();
            let height = self.operand(instr, 1).coerce_int();
            let title = self.operand(instr, 2).to_string();

            self.canvas = None;
            match self.factory.open(width, height, &title) {
                Ok(canvas) => {
                    self.canvas = Some(canvas);
                    eprintln!("Graphics window created: {width}x{height} - {title}");
                }
                Err(err) => eprintln!("{err}"),
            }
        }
        self.set(instr, Value::Integer(1));
    }

    /// Executes a `CALL`. Returns true when execution must stop (only
    /// `quit` does that).
    fn exec_call(&mut self, instr: &IrInstruction) -> bool {
        match instr.label.as_deref() {
            Some("quit") => {
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.handle_events();
                }
                self.canvas = None;
                true
            }
            Some("isKeyDown") => {
                let mut held = false;
                if let (Some(canvas), false) = (self.canvas.as_ref(), instr.operands.is_empty()) {
                    let name = self.operand(instr, 0).to_string();
                    if let Some(key) = KeyId::from_name(&name) {
                        held = canvas.is_key_pressed(key);
                    }
                }
                self.set(instr, Value::Integer(i64::from(held)));
                false
            }
            Some("updateInput") => {
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.handle_events();
                }
                self.set(instr, Value::Integer(1));
                false
            }
            // User-defined functions are not dispatched; the call yields
            // 0 and execution continues.
            _ => {
                self.set(instr, Value::Integer(0));
                false
            }
        }
    }

    /// Reads the instruction's `index`-th operand as a value.
    ///
    /// Constants resolve by parsing their text (int, then float, then
    /// string); anything else is a slot read, with absent slots reading
    /// as integer 0.
    fn operand(&self, instr: &IrInstruction, index: usize) -> Value {
        match instr.operands.get(index) {
            Some(IrValue::Constant(text)) => resolve_constant(text),
            Some(operand) => self
                .slots
                .get(&operand.to_string())
                .cloned()
                .unwrap_or(Value::Integer(0)),
            None => Value::Integer(0),
        }
    }

    /// Stores `value` into the instruction's result slot, if it has one.
    fn set(&mut self, instr: &IrInstruction, value: Value) {
        if let Some(result) = &instr.result {
            self.slots.insert(result.to_string(), value);
        }
    }

    /// Coerces the first `count` operands to integers for a drawing
    /// instruction. `None` when the window is absent or operands are
    /// missing — the instruction then becomes a no-op.
    fn canvas_args(&self, instr: &IrInstruction, count: usize) -> Option<Vec<i64>> {
        if self.canvas.is_none() || instr.operands.len() < count {
            return None;
        }
        Some((0..count).map(|i| self.operand(instr, i).coerce_int()).collect())
    }
}

/// The constant text of a literal-load instruction.
fn constant_text(instr: &IrInstruction) -> &str {
    match instr.operands.first() {
        Some(IrValue::Constant(text)) => text,
        _ => "",
    }
}

/// Maps label names to instruction indices in one prescan.
fn scan_labels(func: &IrFunction) -> HashMap<&str, usize> {
    let mut labels = HashMap::new();
    for (index, instr) in func.instructions.iter().enumerate() {
        if instr.opcode == Opcode::Label {
            if let Some(name) = instr.label.as_deref() {
                labels.insert(name, index);
            }
        }
    }
    labels
}

fn jump_target(labels: &HashMap<&str, usize>, instr: &IrInstruction) -> Result<usize, RuntimeError> {
    let name = instr.label.as_deref().unwrap_or("");
    labels
        .get(name)
        .copied()
        .ok_or_else(|| RuntimeError::UndefinedLabel { name: name.to_string() })
}

/// Parses a raw constant operand: integer first, then float, then the
/// text itself. Boolean literals reach the interpreter this way as the
/// texts `"1"` and `"0"`.
fn resolve_constant(text: &str) -> Value {
    if let Ok(value) = text.trim().parse::<i64>() {
        return Value::Integer(value);
    }
    if let Ok(value) = text.trim().parse::<f64>() {
        return Value::Float(value);
    }
    Value::Str(text.to_string())
}

/// Evaluates a comparison between two values.
///
/// Integers compare as integers; a float on either side widens both to
/// floats; strings compare lexicographically. Everything else is a type
/// error. NaN makes every comparison false except `NE`.
fn compare(opcode: Opcode, a: &Value, b: &Value) -> Result<bool, RuntimeError> {
    use std::cmp::Ordering;

    let ordering: Option<Ordering> = match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Integer(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Integer(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        _ => {
            return Err(RuntimeError::InvalidComparison { op: opcode.to_string() });
        }
    };

    Ok(match ordering {
        Some(ordering) => match opcode {
            Opcode::Eq => ordering == Ordering::Equal,
            Opcode::Ne => ordering != Ordering::Equal,
            Opcode::Lt => ordering == Ordering::Less,
            Opcode::Gt => ordering == Ordering::Greater,
            Opcode::Le => ordering != Ordering::Greater,
            Opcode::Ge => ordering != Ordering::Less,
            _ => false,
        },
        None => opcode == Opcode::Ne,
    })
}
