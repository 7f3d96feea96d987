use thiserror::Error as ThisError;

use crate::models::CustomerInfo;

pub const HELP: &str = "\
Commands:
  menu                          show dishes in the selected category
  tabs                          show categories
  category <name>               filter the menu (use 'All' to reset)
  add <id>                      add a dish to the cart
  inc <id> | dec <id>           change a cart line by one
  qty <id> <n>                  set a cart line quantity (0 removes)
  cart | close                  open or close the cart
  customer <name> <phone> [email]
  checkout                      place the order
  status <order id>             look up an order
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Menu,
    Tabs,
    Category(String),
    Add(String),
    Increment(String),
    Decrement(String),
    Quantity { dish_id: String, quantity: i64 },
    OpenCart,
    CloseCart,
    Customer(CustomerInfo),
    Checkout,
    Status(i64),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum SessionError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, SessionError> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(SessionError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "menu" => Self::Menu,
            "tabs" | "categories" => Self::Tabs,
            "category" | "cat" => {
                if args.is_empty() {
                    return Err(SessionError::Usage("category <name>"));
                }
                // Category labels may contain spaces
                Self::Category(args.join(" "))
            }
            "add" => Self::Add(single(&args, "add <id>")?),
            "inc" | "+" => Self::Increment(single(&args, "inc <id>")?),
            "dec" | "-" => Self::Decrement(single(&args, "dec <id>")?),
            "qty" => match args.as_slice() {
                [dish_id, quantity] => Self::Quantity {
                    dish_id: dish_id.to_string(),
                    quantity: number(quantity)?,
                },
                _ => return Err(SessionError::Usage("qty <id> <n>")),
            },
            "cart" => Self::OpenCart,
            "close" => Self::CloseCart,
            "customer" => match args.as_slice() {
                [name, phone] => Self::Customer(CustomerInfo {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    email: None,
                }),
                [name, phone, email] => Self::Customer(CustomerInfo {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    email: Some(email.to_string()),
                }),
                _ => return Err(SessionError::Usage("customer <name> <phone> [email]")),
            },
            "checkout" => Self::Checkout,
            "status" => Self::Status(number(&single(&args, "status <order id>")?)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(SessionError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn single(args: &[&str], usage: &'static str) -> Result<String, SessionError> {
    match args {
        [value] => Ok(value.to_string()),
        _ => Err(SessionError::Usage(usage)),
    }
}

fn number(raw: &str) -> Result<i64, SessionError> {
    raw.parse()
        .map_err(|_| SessionError::NotANumber(raw.to_string()))
}
