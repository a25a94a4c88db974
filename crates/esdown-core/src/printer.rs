//! Compact tree printer for tests and debugging.
//!
//! Renders the (possibly lowered) tree back to source text. Formatting is
//! structural: parenthesization comes from explicit `Parenthesized` nodes,
//! not from precedence analysis, so this is a faithful rendering of the tree
//! shape rather than a production code emitter.

use std::fmt::Write as _;

use esdown_ast::ast::expression::{
    ArrowBody, AssignmentOp, BinaryOp, ClassExpression, Expression, ExpressionKind, Fixity,
    Literal, ObjectProperty, UnaryOp, UpdateOp,
};
use esdown_ast::ast::member::{
    AccessorDefinition, AccessorKind, ClassMember, ConstructorDefinition, MethodDefinition,
    PropertyKey,
};
use esdown_ast::ast::statement::{Block, Statement, VariableKind};
use esdown_ast::ast::Program;
use esdown_ast::span::Spanned;
use esdown_ast::string_interner::{StringId, StringInterner};

pub fn print_program(program: &Program<'_>, interner: &StringInterner) -> String {
    let mut printer = Printer::new(interner);
    for statement in &program.statements {
        printer.statement(statement);
    }
    printer.out
}

struct Printer<'i> {
    out: String,
    interner: &'i StringInterner,
    indent: usize,
}

impl<'i> Printer<'i> {
    fn new(interner: &'i StringInterner) -> Self {
        Self {
            out: String::new(),
            interner,
            indent: 0,
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn name(&mut self, id: StringId) {
        let text = self.interner.resolve(id);
        self.out.push_str(&text);
    }

    fn statement(&mut self, statement: &Statement<'_>) {
        self.write_indent();
        match statement {
            Statement::Expression(expr) => {
                self.expression(expr);
                self.write(";\n");
            }
            Statement::Variable(_) => {
                self.variable_declaration(statement);
                self.write(";\n");
            }
            Statement::Function(func) => {
                self.write("function ");
                self.name(func.name.node);
                self.params(func.params);
                self.write(" ");
                self.block(&func.body);
                self.write("\n");
            }
            Statement::Class(class) => {
                self.write("class ");
                self.name(class.name.node);
                if let Some(extends) = class.extends {
                    self.write(" extends ");
                    self.expression(extends);
                }
                self.write(" ");
                self.class_body(class.members);
                self.write("\n");
            }
            Statement::Return(ret) => {
                self.write("return");
                if let Some(value) = &ret.value {
                    self.write(" ");
                    self.expression(value);
                }
                self.write(";\n");
            }
            Statement::If(if_stmt) => {
                self.write("if (");
                self.expression(&if_stmt.condition);
                self.write(") ");
                self.block(&if_stmt.then_block);
                if let Some(else_block) = &if_stmt.else_block {
                    self.write(" else ");
                    self.block(else_block);
                }
                self.write("\n");
            }
            Statement::While(while_stmt) => {
                self.write("while (");
                self.expression(&while_stmt.condition);
                self.write(") ");
                self.block(&while_stmt.body);
                self.write("\n");
            }
            Statement::For(for_stmt) => {
                self.write("for (");
                if let Some(init) = for_stmt.init {
                    match init {
                        Statement::Variable(_) => self.variable_declaration(init),
                        Statement::Expression(expr) => self.expression(expr),
                        other => panic!("unsupported for-loop initializer: {other:?}"),
                    }
                }
                self.write("; ");
                if let Some(test) = &for_stmt.test {
                    self.expression(test);
                }
                self.write("; ");
                if let Some(update) = &for_stmt.update {
                    self.expression(update);
                }
                self.write(") ");
                self.block(&for_stmt.body);
                self.write("\n");
            }
            Statement::Throw(expr) => {
                self.write("throw ");
                self.expression(expr);
                self.write(";\n");
            }
            Statement::Block(block) => {
                self.block(block);
                self.write("\n");
            }
        }
    }

    /// `var a = 1, b` — without the trailing semicolon, which depends on
    /// statement position.
    fn variable_declaration(&mut self, statement: &Statement<'_>) {
        let Statement::Variable(decl) = statement else {
            unreachable!("caller checked for a variable declaration")
        };
        self.write(match decl.kind {
            VariableKind::Var => "var ",
            VariableKind::Let => "let ",
            VariableKind::Const => "const ",
        });
        for (i, declarator) in decl.declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.name(declarator.name.node);
            if let Some(init) = &declarator.init {
                self.write(" = ");
                self.expression(init);
            }
        }
    }

    fn block(&mut self, block: &Block<'_>) {
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        for statement in block.statements {
            self.statement(statement);
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn params(&mut self, params: &[Spanned<StringId>]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.name(param.node);
        }
        self.write(")");
    }

    fn class_body(&mut self, members: &[ClassMember<'_>]) {
        if members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        for member in members {
            self.write_indent();
            match member {
                ClassMember::Constructor(ctor) => self.constructor(ctor),
                ClassMember::Method(method) => self.method(method),
                ClassMember::Accessor(accessor) => self.accessor(accessor),
            }
            self.write("\n");
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn constructor(&mut self, ctor: &ConstructorDefinition<'_>) {
        self.write("constructor");
        self.params(ctor.params);
        self.write(" ");
        self.block(&ctor.body);
    }

    fn method(&mut self, method: &MethodDefinition<'_>) {
        if method.is_static {
            self.write("static ");
        }
        self.property_key(&method.key);
        self.params(method.params);
        self.write(" ");
        self.block(&method.body);
    }

    fn accessor(&mut self, accessor: &AccessorDefinition<'_>) {
        if accessor.is_static {
            self.write("static ");
        }
        self.write(match accessor.kind {
            AccessorKind::Get => "get ",
            AccessorKind::Set => "set ",
        });
        self.property_key(&accessor.key);
        self.params(accessor.params);
        self.write(" ");
        self.block(&accessor.body);
    }

    fn property_key(&mut self, key: &PropertyKey<'_>) {
        match key {
            PropertyKey::Identifier(name) => self.name(name.node),
            PropertyKey::String(value) => {
                self.write("\"");
                self.name(value.node);
                self.write("\"");
            }
            PropertyKey::Number(value) => self.number(value.node),
            PropertyKey::Computed(expr) => {
                self.write("[");
                self.expression(expr);
                self.write("]");
            }
        }
    }

    fn number(&mut self, value: f64) {
        if value.fract() == 0.0 && value.is_finite() && value.abs() < 9e15 {
            let _ = write!(self.out, "{}", value as i64);
        } else {
            let _ = write!(self.out, "{value}");
        }
    }

    fn string(&mut self, id: StringId) {
        let text = self.interner.resolve(id);
        self.out.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                other => self.out.push(other),
            }
        }
        self.out.push('"');
    }

    fn expression_list(&mut self, items: &[Expression<'_>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expression(item);
        }
    }

    fn expression(&mut self, expr: &Expression<'_>) {
        match &expr.kind {
            ExpressionKind::Literal(Literal::Number(value)) => self.number(*value),
            ExpressionKind::Literal(Literal::String(value)) => self.string(*value),
            ExpressionKind::Literal(Literal::Boolean(true)) => self.write("true"),
            ExpressionKind::Literal(Literal::Boolean(false)) => self.write("false"),
            ExpressionKind::Literal(Literal::Null) => self.write("null"),
            ExpressionKind::Identifier(name) => self.name(*name),
            ExpressionKind::ThisKeyword => self.write("this"),
            ExpressionKind::SuperKeyword => self.write("super"),
            ExpressionKind::Array(elements) => {
                self.write("[");
                self.expression_list(elements);
                self.write("]");
            }
            ExpressionKind::Object(properties) => self.object_literal(properties),
            ExpressionKind::Function(func) => {
                self.write("function ");
                if let Some(name) = func.name {
                    self.name(name.node);
                }
                self.params(func.params);
                self.write(" ");
                self.block(&func.body);
            }
            ExpressionKind::Arrow(arrow) => {
                self.params(arrow.params);
                self.write(" => ");
                match &arrow.body {
                    ArrowBody::Expression(body) => self.expression(body),
                    ArrowBody::Block(block) => self.block(block),
                }
            }
            ExpressionKind::Class(class) => self.class_expression(class),
            ExpressionKind::Member(object, property) => {
                self.expression(object);
                self.write(".");
                self.name(property.node);
            }
            ExpressionKind::Index(object, key) => {
                self.expression(object);
                self.write("[");
                self.expression(key);
                self.write("]");
            }
            ExpressionKind::Call(callee, args) => {
                self.expression(callee);
                self.write("(");
                self.expression_list(args);
                self.write(")");
            }
            ExpressionKind::New(callee, args) => {
                self.write("new ");
                self.expression(callee);
                self.write("(");
                self.expression_list(args);
                self.write(")");
            }
            ExpressionKind::Binary(op, left, right) => {
                self.expression(left);
                self.write(" ");
                self.write(binary_op_text(*op));
                self.write(" ");
                self.expression(right);
            }
            ExpressionKind::Unary(op, operand) => {
                self.write(unary_op_text(*op));
                self.expression(operand);
            }
            ExpressionKind::Update(op, fixity, operand) => {
                let text = match op {
                    UpdateOp::Increment => "++",
                    UpdateOp::Decrement => "--",
                };
                match fixity {
                    Fixity::Prefix => {
                        self.write(text);
                        self.expression(operand);
                    }
                    Fixity::Postfix => {
                        self.expression(operand);
                        self.write(text);
                    }
                }
            }
            ExpressionKind::Assignment(target, op, value) => {
                self.expression(target);
                self.write(" ");
                self.write(assignment_op_text(*op));
                self.write(" ");
                self.expression(value);
            }
            ExpressionKind::Conditional(condition, when_true, when_false) => {
                self.expression(condition);
                self.write(" ? ");
                self.expression(when_true);
                self.write(" : ");
                self.expression(when_false);
            }
            ExpressionKind::Comma(operands) => self.expression_list(operands),
            ExpressionKind::Parenthesized(inner) => {
                self.write("(");
                self.expression(inner);
                self.write(")");
            }
        }
    }

    fn object_literal(&mut self, properties: &[ObjectProperty<'_>]) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match property {
                ObjectProperty::Property { key, value, .. } => {
                    self.property_key(key);
                    self.write(": ");
                    self.expression(value);
                }
                ObjectProperty::Method(method) => self.method(method),
                ObjectProperty::Accessor(accessor) => self.accessor(accessor),
                ObjectProperty::Shorthand(name) => self.name(name.node),
            }
        }
        self.write(" }");
    }

    fn class_expression(&mut self, class: &ClassExpression<'_>) {
        self.write("class");
        if let Some(name) = class.name {
            self.write(" ");
            self.name(name.node);
        }
        if let Some(extends) = class.extends {
            self.write(" extends ");
            self.expression(extends);
        }
        self.write(" ");
        self.class_body(class.members);
    }
}

fn binary_op_text(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::StrictEqual => "===",
        BinaryOp::StrictNotEqual => "!==",
        BinaryOp::LessThan => "<",
        BinaryOp::LessThanOrEqual => "<=",
        BinaryOp::GreaterThan => ">",
        BinaryOp::GreaterThanOrEqual => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::BitwiseAnd => "&",
        BinaryOp::BitwiseOr => "|",
        BinaryOp::BitwiseXor => "^",
        BinaryOp::ShiftLeft => "<<",
        BinaryOp::ShiftRight => ">>",
        BinaryOp::UnsignedShiftRight => ">>>",
        BinaryOp::In => "in",
        BinaryOp::Instanceof => "instanceof",
    }
}

fn unary_op_text(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Negate => "-",
        UnaryOp::Plus => "+",
        UnaryOp::Not => "!",
        UnaryOp::BitwiseNot => "~",
        UnaryOp::TypeOf => "typeof ",
        UnaryOp::Void => "void ",
        UnaryOp::Delete => "delete ",
    }
}

fn assignment_op_text(op: AssignmentOp) -> &'static str {
    match op {
        AssignmentOp::Assign => "=",
        AssignmentOp::AddAssign => "+=",
        AssignmentOp::SubtractAssign => "-=",
        AssignmentOp::MultiplyAssign => "*=",
        AssignmentOp::DivideAssign => "/=",
        AssignmentOp::ModuloAssign => "%=",
        AssignmentOp::ShiftLeftAssign => "<<=",
        AssignmentOp::ShiftRightAssign => ">>=",
        AssignmentOp::UnsignedShiftRightAssign => ">>>=",
        AssignmentOp::BitwiseAndAssign => "&=",
        AssignmentOp::BitwiseOrAssign => "|=",
        AssignmentOp::BitwiseXorAssign => "^=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esdown_ast::factory;
    use esdown_ast::span::Span;

    #[test]
    fn test_prints_member_call() {
        let arena = bumpalo::Bump::new();
        let interner = StringInterner::new();
        let callee = factory::member(
            &arena,
            factory::identifier(interner.intern("console"), Span::dummy()),
            Spanned::new(interner.intern("log"), Span::dummy()),
            Span::dummy(),
        );
        let call = factory::call(
            &arena,
            callee,
            vec![factory::string_literal(interner.intern("hi"), Span::dummy())],
            Span::dummy(),
        );
        let program = Program::new(vec![Statement::Expression(call)], Span::dummy());
        assert_eq!(print_program(&program, &interner), "console.log(\"hi\");\n");
    }

    #[test]
    fn test_prints_integral_numbers_without_fraction() {
        let arena = bumpalo::Bump::new();
        let interner = StringInterner::new();
        let sum = factory::binary(
            &arena,
            BinaryOp::Add,
            factory::number_literal(1.0, Span::dummy()),
            factory::number_literal(2.5, Span::dummy()),
            Span::dummy(),
        );
        let program = Program::new(vec![Statement::Expression(sum)], Span::dummy());
        assert_eq!(print_program(&program, &interner), "1 + 2.5;\n");
    }

    #[test]
    fn test_prints_var_declaration() {
        let arena = bumpalo::Bump::new();
        let interner = StringInterner::new();
        let names = [interner.intern("$__0"), interner.intern("$__1")];
        let decl = factory::var_declaration(&arena, &names, Span::dummy());
        let program = Program::new(vec![decl], Span::dummy());
        assert_eq!(print_program(&program, &interner), "var $__0, $__1;\n");
    }
}
