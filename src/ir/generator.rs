use std::collections::HashMap;

use crate::{
    ast::{BinaryOp, Expr, FunctionDecl, LiteralKind, Program, Stmt, UnaryOp},
    ir::{IrFunction, IrInstruction, IrProgram, IrValue, Opcode},
};

/// Lowers a validated AST to linear three-address IR.
///
/// Lowering has no error paths: malformed programs are presumed rejected
/// upstream, and name lookups that miss fall back to registering the name
/// as a fresh local so the output stays total.
pub struct IrGenerator<'a> {
    program: &'a Program,
}

impl<'a> IrGenerator<'a> {
    /// Creates a generator for `program`.
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Lowers every function. Temp and label counters and the name table
    /// reset at each function boundary.
    #[must_use]
    pub fn generate(&self) -> IrProgram {
        IrProgram {
            functions: self.program.functions.iter().map(lower_function).collect(),
        }
    }
}

fn lower_function(func: &FunctionDecl) -> IrFunction {
    let mut builder = FunctionBuilder::default();
    for param in &func.params {
        builder
            .symbols
            .insert(param.name.clone(), IrValue::Local(param.name.clone()));
    }
    builder.lower_stmt(&func.body);

    IrFunction {
        name: func.name.clone(),
        return_type: func.return_type.clone(),
        params: func.params.clone(),
        instructions: builder.instructions,
    }
}

/// Per-function lowering state: the instruction list under construction,
/// the name → slot table, and the fresh temp/label counters.
#[derive(Default)]
struct FunctionBuilder {
    instructions: Vec<IrInstruction>,
    symbols: HashMap<String, IrValue>,
    temps: usize,
    labels: usize,
}

impl FunctionBuilder {
    fn emit(&mut self, instr: IrInstruction) {
        self.instructions.push(instr);
    }

    fn fresh_temp(&mut self) -> IrValue {
        let temp = IrValue::Temp(self.temps);
        self.temps += 1;
        temp
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("L{}", self.labels);
        self.labels += 1;
        label
    }

    fn emit_label(&mut self, name: String) {
        let mut instr = IrInstruction::new(Opcode::Label);
        instr.label = Some(name);
        self.emit(instr);
    }

    fn emit_jump(&mut self, opcode: Opcode, cond: Option<IrValue>, target: String) {
        let mut instr = IrInstruction::new(opcode);
        if let Some(cond) = cond {
            instr.operands.push(cond);
        }
        instr.label = Some(target);
        self.emit(instr);
    }

    /// Resolves `name` to its slot, registering it as a local on a miss.
    /// The semantic pass reports unknown names; lowering stays total.
    fn slot_for(&mut self, name: &str) -> IrValue {
        self.symbols
            .entry(name.to_string())
            .or_insert_with(|| IrValue::Local(name.to_string()))
            .clone()
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                for stmt in statements {
                    self.lower_stmt(stmt);
                }
            }

            Stmt::VarDecl { name, init, .. } => {
                let slot = IrValue::Local(name.clone());
                self.symbols.insert(name.clone(), slot.clone());
                if let Some(init) = init {
                    let value = self.lower_expr(init);
                    let mut instr = IrInstruction::new(Opcode::Store);
                    instr.operands.push(value);
                    instr.result = Some(slot);
                    self.emit(instr);
                }
            }

            Stmt::Return { value } => {
                let mut instr = IrInstruction::new(Opcode::Ret);
                if let Some(value) = value {
                    let lowered = self.lower_expr(value);
                    instr.operands.push(lowered);
                }
                self.emit(instr);
            }

            Stmt::If { condition, then_branch, else_branch } => {
                let cond = self.lower_expr(condition);
                let then_label = self.fresh_label();
                let else_label = self.fresh_label();
                let end_label = self.fresh_label();

                self.emit_jump(Opcode::Jz, Some(cond), else_label.clone());
                self.emit_label(then_label);
                self.lower_stmt(then_branch);
                self.emit_jump(Opcode::Jmp, None, end_label.clone());
                self.emit_label(else_label);
                if let Some(else_branch) = else_branch {
                    self.lower_stmt(else_branch);
                }
                self.emit_label(end_label);
            }

            Stmt::While { condition, body } => {
                let loop_label = self.fresh_label();
                let end_label = self.fresh_label();

                self.emit_label(loop_label.clone());
                let cond = self.lower_expr(condition);
                self.emit_jump(Opcode::Jz, Some(cond), end_label.clone());
                self.lower_stmt(body);
                self.emit_jump(Opcode::Jmp, None, loop_label);
                self.emit_label(end_label);
            }

            // The for-header shares the function's name table; it does
            // not open a scope of its own, matching the analyzer.
            Stmt::For { init, condition, increment, body } => {
                if let Some(init) = init {
                    self.lower_stmt(init);
                }
                let loop_label = self.fresh_label();
                let end_label = self.fresh_label();

                self.emit_label(loop_label.clone());
                if let Some(condition) = condition {
                    let cond = self.lower_expr(condition);
                    self.emit_jump(Opcode::Jz, Some(cond), end_label.clone());
                }
                self.lower_stmt(body);
                if let Some(increment) = increment {
                    self.lower_expr(increment);
                }
                self.emit_jump(Opcode::Jmp, None, loop_label);
                self.emit_label(end_label);
            }

            Stmt::Print { expr } => {
                let value = self.lower_expr(expr);
                let mut instr = IrInstruction::new(Opcode::Print);
                instr.operands.push(value);
                self.emit(instr);
            }

            Stmt::Expression { expr } => {
                self.lower_expr(expr);
            }
        }
    }

    fn lower_expr(&mut self, expr: &Expr) -> IrValue {
        match expr {
            Expr::Literal { kind, text } => self.lower_literal(*kind, text),

            Expr::Identifier { name } => self.slot_for(name),

            Expr::Binary { left, op, right } => {
                let left = self.lower_expr(left);
                let right = self.lower_expr(right);
                let result = self.fresh_temp();
                let mut instr = IrInstruction::new(binary_opcode(*op));
                instr.operands.push(left);
                instr.operands.push(right);
                instr.result = Some(result.clone());
                self.emit(instr);
                result
            }

            Expr::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let result = self.fresh_temp();
                let opcode = match op {
                    UnaryOp::Neg => Opcode::Neg,
                    UnaryOp::Not => Opcode::Not,
                };
                let mut instr = IrInstruction::new(opcode);
                instr.operands.push(operand);
                instr.result = Some(result.clone());
                self.emit(instr);
                result
            }

            Expr::Assign { name, value } => {
                let value = self.lower_expr(value);
                let slot = self.slot_for(name);
                let mut instr = IrInstruction::new(Opcode::Store);
                instr.operands.push(value);
                instr.result = Some(slot.clone());
                self.emit(instr);
                slot
            }

            Expr::Index { array, index } => {
                let array = self.lower_expr(array);
                let index = self.lower_expr(index);
                let result = self.fresh_temp();
                let mut instr = IrInstruction::new(Opcode::Load);
                instr.operands.push(array);
                instr.operands.push(index);
                instr.result = Some(result.clone());
                self.emit(instr);
                result
            }

            Expr::Input { prompt } => {
                let result = self.fresh_temp();
                let mut instr = IrInstruction::new(Opcode::Input);
                if let Some(prompt) = prompt {
                    if let Expr::Literal { kind: LiteralKind::Str, text } = prompt.as_ref() {
                        instr.prompt = Some(text.clone());
                    }
                }
                instr.result = Some(result.clone());
                self.emit(instr);
                result
            }

            Expr::KeyPressed { .. } => {
                let result = self.fresh_temp();
                let mut instr = IrInstruction::new(Opcode::KeyPressed);
                instr.result = Some(result.clone());
                self.emit(instr);
                result
            }

            Expr::Call { name, args } => self.lower_call(name, args),
        }
    }

    /// Numeric and string literals load into a fresh temp; boolean
    /// literals return their constant text directly without emitting.
    fn lower_literal(&mut self, kind: LiteralKind, text: &str) -> IrValue {
        let opcode = match kind {
            LiteralKind::Int => Opcode::LoadInt,
            LiteralKind::Float => Opcode::LoadFloat,
            LiteralKind::Str => Opcode::LoadString,
            LiteralKind::True | LiteralKind::False => {
                return IrValue::Constant(text.to_string());
            }
        };
        let result = self.fresh_temp();
        let mut instr = IrInstruction::new(opcode);
        instr.operands.push(IrValue::Constant(text.to_string()));
        instr.result = Some(result.clone());
        self.emit(instr);
        result
    }

    fn lower_call(&mut self, name: &str, args: &[Expr]) -> IrValue {
        let result = self.fresh_temp();

        // Graphics built-ins get their own opcode with every argument
        // lowered in source order.
        let graphics_opcode = match name {
            "screen" => Some(Opcode::Screen),
            "clearScreen" => Some(Opcode::ClearScreen),
            "drawPixel" => Some(Opcode::DrawPixel),
            "drawRect" => Some(Opcode::DrawRect),
            "drawLine" => Some(Opcode::DrawLine),
            "drawCircle" => Some(Opcode::DrawCircle),
            _ => None,
        };
        if let Some(opcode) = graphics_opcode {
            let mut instr = IrInstruction::new(opcode);
            for arg in args {
                let lowered = self.lower_expr(arg);
                instr.operands.push(lowered);
            }
            instr.result = Some(result.clone());
            self.emit(instr);
            return result;
        }

        match name {
            "display" => {
                let mut instr = IrInstruction::new(Opcode::Present);
                instr.result = Some(result.clone());
                self.emit(instr);
            }
            // The interpreter recognizes these three by label.
            "quit" | "updateInput" => {
                let mut instr = IrInstruction::new(Opcode::Call);
                instr.label = Some(name.to_string());
                instr.result = Some(result.clone());
                self.emit(instr);
            }
            "isKeyDown" => {
                let mut instr = IrInstruction::new(Opcode::Call);
                instr.label = Some(name.to_string());
                if let Some(key) = args.first() {
                    let lowered = self.lower_expr(key);
                    instr.operands.push(lowered);
                }
                instr.result = Some(result.clone());
                self.emit(instr);
            }
            _ => {
                let mut instr = IrInstruction::new(Opcode::Call);
                instr.label = Some(name.to_string());
                for arg in args {
                    let lowered = self.lower_expr(arg);
                    instr.operands.push(lowered);
                }
                instr.result = Some(result.clone());
                self.emit(instr);
            }
        }
        result
    }
}

/// Maps a binary operator to its opcode. `||` and `,` both lower to
/// `CONCAT`: comma-as-concat is how multi-argument `print` formatting is
/// synthesized at the surface, and `||` shares the lowering.
fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Sub => Opcode::Sub,
        BinaryOp::Mul => Opcode::Mul,
        BinaryOp::Div => Opcode::Div,
        BinaryOp::Mod => Opcode::Mod,
        BinaryOp::Eq => Opcode::Eq,
        BinaryOp::Ne => Opcode::Ne,
        BinaryOp::Lt => Opcode::Lt,
        BinaryOp::Gt => Opcode::Gt,
        BinaryOp::Le => Opcode::Le,
        BinaryOp::Ge => Opcode::Ge,
        BinaryOp::And => Opcode::And,
        BinaryOp::Or | BinaryOp::Comma => Opcode::Concat,
    }
}
