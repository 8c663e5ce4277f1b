//! Expression trees for equations
//!
//! Literal numbers keep their source text so that unparsing never loses
//! precision. Operators know their own precedence; the unparser relies on it
//! to decide where parentheses are needed.

use smol_str::SmolStr;

/// A number together with its optional units, e.g. `1.5{millivolt}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Verbatim source text of the number
    pub value: SmolStr,
    pub units: Option<SmolStr>,
}

impl Literal {
    pub fn new(value: impl Into<SmolStr>, units: Option<SmolStr>) -> Self {
        Self {
            value: value.into(),
            units,
        }
    }
}

/// An equation expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Number(Literal),
    Constant(Constant),
    Identifier(SmolStr),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
    /// `ode(variable, bvar[, order])`
    Derivative {
        variable: SmolStr,
        bvar: SmolStr,
        order: Option<Literal>,
    },
    /// `sel case condition: value; ... otherwise: value; endsel`
    Piecewise {
        pieces: Vec<Piece>,
        otherwise: Option<Box<Expr>>,
    },
}

/// One `case` of a piecewise expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub condition: Expr,
    pub value: Expr,
}

impl Expr {
    pub fn number(value: impl Into<SmolStr>, units: impl Into<SmolStr>) -> Self {
        Self::Number(Literal::new(value, Some(units.into())))
    }

    pub fn identifier(name: impl Into<SmolStr>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Self::Call { function, args }
    }

    /// Binding strength of the expression's outermost operator
    ///
    /// Atoms (literals, names, calls, piecewise) bind tightest.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Unary { .. } => UnaryOp::PRECEDENCE,
            Self::Binary { op, .. } => op.precedence(),
            _ => u8::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    True,
    False,
    NaN,
    Pi,
    Infinity,
    E,
}

impl Constant {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::NaN => "nan",
            Self::Pi => "pi",
            Self::Infinity => "inf",
            Self::E => "e",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "true" => Self::True,
            "false" => Self::False,
            "nan" => Self::NaN,
            "pi" => Self::Pi,
            "inf" => Self::Infinity,
            "e" => Self::E,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
}

impl UnaryOp {
    pub const PRECEDENCE: u8 = 8;

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Not => "not ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    Xor,
    And,
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOp {
    /// Higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::Xor => 2,
            Self::And => 3,
            Self::Eq | Self::Neq | Self::Lt | Self::Leq | Self::Gt | Self::Geq => 4,
            Self::Plus | Self::Minus => 5,
            Self::Times | Self::Divide => 6,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::Xor => "xor",
            Self::And => "and",
            Self::Eq => "==",
            Self::Neq => "<>",
            Self::Lt => "<",
            Self::Leq => "<=",
            Self::Gt => ">",
            Self::Geq => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.precedence() == 4
    }
}

/// How many arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    One,
    OneOrTwo,
    Two,
    TwoOrMore,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::One => count == 1,
            Self::OneOrTwo => count == 1 || count == 2,
            Self::Two => count == 2,
            Self::TwoOrMore => count >= 2,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::One => "one argument",
            Self::OneOrTwo => "one or two arguments",
            Self::Two => "two arguments",
            Self::TwoOrMore => "at least two arguments",
        }
    }
}

macro_rules! functions {
    ($($variant:ident => $name:literal, $arity:ident;)*) => {
        /// Mathematical functions callable as `name(args)`
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Function {
            $($variant,)*
        }

        impl Function {
            pub const ALL: &'static [Function] = &[$(Function::$variant,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            pub fn arity(&self) -> Arity {
                match self {
                    $(Self::$variant => Arity::$arity,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

functions! {
    Abs => "abs", One;
    Ceil => "ceil", One;
    Exp => "exp", One;
    Fact => "fact", One;
    Floor => "floor", One;
    Ln => "ln", One;
    Sqr => "sqr", One;
    Sqrt => "sqrt", One;
    Sin => "sin", One;
    Cos => "cos", One;
    Tan => "tan", One;
    Sec => "sec", One;
    Csc => "csc", One;
    Cot => "cot", One;
    Sinh => "sinh", One;
    Cosh => "cosh", One;
    Tanh => "tanh", One;
    Sech => "sech", One;
    Csch => "csch", One;
    Coth => "coth", One;
    Asin => "asin", One;
    Acos => "acos", One;
    Atan => "atan", One;
    Asec => "asec", One;
    Acsc => "acsc", One;
    Acot => "acot", One;
    Asinh => "asinh", One;
    Acosh => "acosh", One;
    Atanh => "atanh", One;
    Asech => "asech", One;
    Acsch => "acsch", One;
    Acoth => "acoth", One;
    Log => "log", OneOrTwo;
    Pow => "pow", Two;
    Rem => "rem", Two;
    Root => "root", Two;
    Min => "min", TwoOrMore;
    Max => "max", TwoOrMore;
    Gcd => "gcd", TwoOrMore;
    Lcm => "lcm", TwoOrMore;
}
