//! Calculatrice RPN — noyau de calcul
//!
//! Pipeline : jetons -> RPN (shunting-yard) -> réduction, sur des rationnels exacts.
//!
//! ```
//! use calculatrice_rpn::noyau::{evaluate, formater};
//!
//! let v = evaluate("0.1 + 0.2").unwrap();
//! assert_eq!(formater(&v, 20), "0.3");
//! ```

pub mod noyau;

pub use noyau::{evaluate, ErreurCalc, Nombre};
